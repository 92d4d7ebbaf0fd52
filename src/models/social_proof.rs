use serde::{Deserialize, Serialize};

/// A celebrity outfit used as an additional style anchor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SocialProofContext {
    pub celebrity: String,
    pub event: Option<String>,
    pub outfit_description: String,
    pub outfit_tags: Vec<String>,
    pub colors: Vec<String>,
    pub patterns: Vec<String>,
}

impl SocialProofContext {
    pub fn new(celebrity: impl Into<String>) -> Self {
        Self {
            celebrity: celebrity.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.outfit_description = description.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outfit_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Event name, if a non-empty one was supplied
    pub fn event_name(&self) -> Option<&str> {
        self.event.as_deref().filter(|e| !e.trim().is_empty())
    }

    /// Whether a celebrity name was supplied; contexts without one are ignored
    pub fn has_celebrity(&self) -> bool {
        !self.celebrity.trim().is_empty()
    }

    /// Whether the context carries enough to anchor recommendations on
    ///
    /// Scraped entries without a celebrity or a description are discarded upstream.
    pub fn is_usable(&self) -> bool {
        self.has_celebrity() && !self.outfit_description.trim().is_empty()
    }

    /// Merges another sighting of the same celebrity into this one
    ///
    /// Returns `self` unchanged when the celebrities differ.
    pub fn merge(mut self, other: &SocialProofContext) -> Self {
        if !self.celebrity.eq_ignore_ascii_case(&other.celebrity) {
            return self;
        }

        for (target, source) in [
            (&mut self.outfit_tags, &other.outfit_tags),
            (&mut self.colors, &other.colors),
            (&mut self.patterns, &other.patterns),
        ] {
            for value in source {
                if !target.iter().any(|v| v.eq_ignore_ascii_case(value)) {
                    target.push(value.clone());
                }
            }
        }

        if other.outfit_description.len() > self.outfit_description.len() {
            self.outfit_description = other.outfit_description.clone();
        }

        if self.event_name().is_none() {
            if let Some(event) = other.event_name() {
                self.event = Some(event.to_string());
            }
        }

        self
    }
}

/// Finds the context for a celebrity: exact (case-insensitive) name first, then substring
pub fn find_by_celebrity<'a>(
    contexts: &'a [SocialProofContext],
    celebrity: &str,
) -> Option<&'a SocialProofContext> {
    let needle = celebrity.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    contexts
        .iter()
        .find(|c| c.celebrity.to_lowercase() == needle)
        .or_else(|| {
            contexts
                .iter()
                .find(|c| c.celebrity.to_lowercase().contains(&needle))
        })
}
