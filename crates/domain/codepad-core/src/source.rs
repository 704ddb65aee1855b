use serde::{Deserialize, Deserializer, Serialize};

/// Which of the three editable buffers an operation targets.
///
/// Doubles as the active editor tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Markup,
    Style,
    Script,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [SourceKind::Markup, SourceKind::Style, SourceKind::Script];

    pub fn label(self) -> &'static str {
        match self {
            SourceKind::Markup => "HTML",
            SourceKind::Style => "CSS",
            SourceKind::Script => "JavaScript",
        }
    }
}

/// Layout of the editor surface relative to the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Editor and preview side by side.
    #[default]
    Split,
    /// Editor takes the full width; the preview is hidden.
    Expanded,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Split => ViewMode::Expanded,
            ViewMode::Expanded => ViewMode::Split,
        }
    }

    pub fn shows_preview(self) -> bool {
        matches!(self, ViewMode::Split)
    }
}

/// The three independent text buffers of a project.
///
/// Field names on the wire follow the remote store (`htmlCode`, `cssCode`,
/// `jsCode`); a missing or `null` field decodes as an empty buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSet {
    #[serde(rename = "htmlCode", default, deserialize_with = "null_as_empty")]
    pub markup: String,
    #[serde(rename = "cssCode", default, deserialize_with = "null_as_empty")]
    pub style: String,
    #[serde(rename = "jsCode", default, deserialize_with = "null_as_empty")]
    pub script: String,
}

pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl SourceSet {
    pub fn new(
        markup: impl Into<String>,
        style: impl Into<String>,
        script: impl Into<String>,
    ) -> Self {
        Self {
            markup: markup.into(),
            style: style.into(),
            script: script.into(),
        }
    }

    pub fn get(&self, kind: SourceKind) -> &str {
        match kind {
            SourceKind::Markup => &self.markup,
            SourceKind::Style => &self.style,
            SourceKind::Script => &self.script,
        }
    }

    pub fn get_mut(&mut self, kind: SourceKind) -> &mut String {
        match kind {
            SourceKind::Markup => &mut self.markup,
            SourceKind::Style => &mut self.style,
            SourceKind::Script => &mut self.script,
        }
    }

    /// Replaces one buffer wholesale.
    pub fn set(&mut self, kind: SourceKind, text: impl Into<String>) {
        *self.get_mut(kind) = text.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_only_touches_the_named_buffer() {
        let mut set = SourceSet::new("<p>a</p>", "p{}", "1");
        set.set(SourceKind::Style, "p{color:red}");
        assert_eq!(set.markup, "<p>a</p>");
        assert_eq!(set.style, "p{color:red}");
        assert_eq!(set.script, "1");
    }

    #[test]
    fn missing_wire_fields_decode_as_empty() {
        let set: SourceSet = serde_json::from_str(r#"{"htmlCode":"<b>x</b>"}"#).unwrap();
        assert_eq!(set.markup, "<b>x</b>");
        assert!(set.style.is_empty());
        assert!(set.script.is_empty());
    }

    #[test]
    fn null_wire_fields_decode_as_empty() {
        let set: SourceSet =
            serde_json::from_str(r#"{"htmlCode":"<b>x</b>","cssCode":null,"jsCode":null}"#)
                .unwrap();
        assert_eq!(set, SourceSet::new("<b>x</b>", "", ""));
    }

    #[test]
    fn view_mode_toggles_back_and_forth() {
        assert_eq!(ViewMode::Split.toggled(), ViewMode::Expanded);
        assert_eq!(ViewMode::Expanded.toggled(), ViewMode::Split);
        assert!(!ViewMode::Expanded.shows_preview());
    }
}
