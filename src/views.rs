use handlebars::{Handlebars, RenderError, TemplateError};
use scraper::Html;
use serde_json::json;

use crate::models::{DishSummary, RecipeDetail, SearchFilters, CUISINES};

const DESCRIPTION_LEN: usize = 160;
const DISABLED_HINT: &str = "Please enter a dish name or preparation time in minutes.";

pub const SEARCH_FAILED: &str = "Failed to fetch recipes.";
pub const DETAIL_FAILED: &str = "Failed to fetch recipe details.";

/// Compiled page templates, shared read-only by every request.
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_partial("head", include_str!("../templates/head.hbs"))?;
        registry.register_template_string("search_form", include_str!("../templates/search_form.hbs"))?;
        registry.register_template_string("dishes", include_str!("../templates/dishes.hbs"))?;
        registry.register_template_string("recipe", include_str!("../templates/recipe.hbs"))?;
        registry.register_template_string("failure", include_str!("../templates/failure.hbs"))?;
        Ok(Self { registry })
    }

    pub fn search_form(&self, filters: &SearchFilters) -> Result<String, RenderError> {
        let cuisines: Vec<_> = CUISINES
            .iter()
            .map(|name| json!({ "name": name, "selected": filters.cuisine() == Some(*name) }))
            .collect();

        self.registry.render(
            "search_form",
            &json!({
                "page_title": "Recipe Finder",
                "query": filters.query().unwrap_or_default(),
                "cuisines": cuisines,
                "max_ready_time": filters.max_ready_time().unwrap_or_default(),
                "submittable": filters.is_submittable(),
                "disabled_hint": DISABLED_HINT,
            }),
        )
    }

    pub fn dishes(&self, dishes: &[DishSummary]) -> Result<String, RenderError> {
        self.registry.render(
            "dishes",
            &json!({
                "page_title": "Discover Delicious Recipes",
                "dishes": dishes,
            }),
        )
    }

    pub fn recipe(&self, recipe: &RecipeDetail) -> Result<String, RenderError> {
        self.registry.render(
            "recipe",
            &json!({
                "page_title": recipe.title,
                "description": plain_text(&recipe.summary, DESCRIPTION_LEN),
                "recipe": recipe,
            }),
        )
    }

    pub fn failure(&self, message: &str) -> Result<String, RenderError> {
        self.registry.render("failure", &json!({ "message": message }))
    }
}

// ── Markup helpers ───────────────────────────────────────────────────────────

/// Text content of an HTML fragment with whitespace collapsed, cut to at most
/// `max_chars` characters.
fn plain_text(html: &str, max_chars: usize) -> String {
    let fragment = Html::parse_fragment(html);
    let text = fragment.root_element().text().collect::<String>();
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if text.chars().count() <= max_chars {
        return text;
    }
    // Leave room for the ellipsis.
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}
