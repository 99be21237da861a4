//! Annotation selection and text substitution layers

/// Values substituted into annotation text, gathered from the loaded
/// text substitution files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextSubstitutionLayers {
    substitutions: Vec<(String, String)>,
}

impl TextSubstitutionLayers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the content; returns true if it changed
    pub fn recompute(&mut self, substitutions: Vec<(String, String)>) -> bool {
        if substitutions == self.substitutions {
            return false;
        }
        self.substitutions = substitutions;
        true
    }

    /// Value for a substitution name; the first file that defines it wins
    pub fn value(&self, name: &str) -> Option<&str> {
        self.substitutions
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.substitutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.substitutions.is_empty()
    }

    /// Replace `$NAME$` markers in `text`
    pub fn substitute(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (name, value) in &self.substitutions {
            result = result.replace(&format!("${name}$"), value);
        }
        result
    }
}

/// User selection state for annotations
#[derive(Debug, Clone, Default)]
pub struct AnnotationManager {
    selected: Vec<String>,
    text_substitution_layers: TextSubstitutionLayers,
}

impl AnnotationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, annotation: impl Into<String>) {
        self.selected.push(annotation.into());
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn text_substitution_layers(&self) -> &TextSubstitutionLayers {
        &self.text_substitution_layers
    }

    pub fn text_substitution_layers_mut(&mut self) -> &mut TextSubstitutionLayers {
        &mut self.text_substitution_layers
    }

    /// Deselect everything. Substitution layers follow the files and are
    /// recomputed separately.
    pub fn reset(&mut self) {
        self.selected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recompute_reports_changes() {
        let mut layers = TextSubstitutionLayers::new();
        assert!(!layers.recompute(Vec::new()));
        let subs = vec![("SUBJECT".to_string(), "S01".to_string())];
        assert!(layers.recompute(subs.clone()));
        assert!(!layers.recompute(subs));
        assert_eq!(layers.value("SUBJECT"), Some("S01"));
        assert_eq!(layers.substitute("Subject $SUBJECT$"), "Subject S01");
    }

    #[test]
    fn test_reset_clears_selection() {
        let mut manager = AnnotationManager::new();
        manager.select("arrow");
        manager.reset();
        assert!(manager.selected().is_empty());
    }
}
