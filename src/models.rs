use serde::{Deserialize, Serialize};

pub const CUISINES: &[&str] = &["Italian", "Mexican", "Chinese"];

// ── Search filters ───────────────────────────────────────────────────────────

/// The three search inputs as they arrive on `/`, `/search` and `/dishes`.
/// An empty string counts as absent everywhere.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchFilters {
    pub query: Option<String>,
    pub cuisine: Option<String>,
    pub max_ready_time: Option<String>,
}

impl SearchFilters {
    /// Builds filters from a raw `application/x-www-form-urlencoded` query.
    /// Unknown keys are ignored and the first non-empty value of a repeated
    /// key wins.
    pub fn from_query(raw: &str) -> Self {
        let mut filters = Self::default();
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            let slot = match key.as_ref() {
                "query" => &mut filters.query,
                "cuisine" => &mut filters.cuisine,
                "maxReadyTime" => &mut filters.max_ready_time,
                _ => continue,
            };
            if non_empty(slot).is_none() {
                *slot = Some(value.into_owned());
            }
        }
        filters
    }

    pub fn query(&self) -> Option<&str> {
        non_empty(&self.query)
    }

    pub fn cuisine(&self) -> Option<&str> {
        non_empty(&self.cuisine)
    }

    pub fn max_ready_time(&self) -> Option<&str> {
        non_empty(&self.max_ready_time)
    }

    pub fn is_submittable(&self) -> bool {
        self.query().is_some() || self.cuisine().is_some() || self.max_ready_time().is_some()
    }

    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        if let Some(query) = self.query() {
            serializer.append_pair("query", query);
        }
        if let Some(cuisine) = self.cuisine() {
            serializer.append_pair("cuisine", cuisine);
        }
        if let Some(max_ready_time) = self.max_ready_time() {
            serializer.append_pair("maxReadyTime", max_ready_time);
        }
        serializer.finish()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

// ── View models ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct DishSummary {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
}

#[derive(Debug, Default, Clone, Serialize, PartialEq, Eq)]
pub struct RecipeDetail {
    pub title: String,
    pub image: String,
    pub instructions: String,
    pub ingredients: Vec<String>,
    pub ready_in_minutes: u32,
    pub servings: u32,
    pub summary: String,
}

// ── Upstream payloads ────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<DishSummary>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInformation {
    pub title: Option<String>,
    pub image: Option<String>,
    pub instructions: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub extended_ingredients: Vec<IngredientInfo>,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub summary: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct IngredientInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

impl From<RecipeInformation> for RecipeDetail {
    fn from(info: RecipeInformation) -> Self {
        Self {
            title: info.title.unwrap_or_default(),
            image: info.image.unwrap_or_default(),
            instructions: info.instructions.unwrap_or_default(),
            ingredients: info
                .extended_ingredients
                .into_iter()
                .map(|ingredient| ingredient.name)
                .collect(),
            ready_in_minutes: info.ready_in_minutes.unwrap_or_default(),
            servings: info.servings.unwrap_or_default(),
            summary: info.summary.unwrap_or_default(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
