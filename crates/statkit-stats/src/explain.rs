//! Rendering of calculation steps.
//!
//! Each result record in this crate implements [`Explain`], which yields the
//! derivation of its values (the formulas substituted with the sample's
//! numbers) as well as a short summary for when the steps are not wanted.

use std::fmt;

/// A result that can describe how it was calculated.
pub trait Explain {
    /// Upper-case heading of the calculation, e.g. `MEASURES OF CENTER`.
    fn title(&self) -> &'static str;

    /// The derivation, one line per step. Empty lines separate sections.
    fn steps(&self) -> Vec<String>;

    /// The final values only.
    fn summary(&self) -> Vec<String>;

    /// Bundles the title and the derivation steps.
    fn explanation(&self) -> Explanation {
        Explanation {
            title: self.title(),
            lines: self.steps(),
        }
    }

    /// Bundles the title and the summary lines.
    fn brief(&self) -> Explanation {
        Explanation {
            title: self.title(),
            lines: self.summary(),
        }
    }
}

/// A titled block of text lines.
///
/// # Examples
///
/// ```
/// use statkit_stats::Explanation;
///
/// let explanation = Explanation {
///     title: "RANGE",
///     lines: vec!["Range = 9 - 2 = 7".to_owned()],
/// };
/// assert_eq!(explanation.to_string(), "=== RANGE ===\nRange = 9 - 2 = 7\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub title: &'static str,
    pub lines: Vec<String>,
}

impl Explanation {
    /// Renders the explanation with either its steps or its summary.
    pub fn of<E>(item: &E, show_steps: bool) -> Self
    where
        E: Explain + ?Sized,
    {
        if show_steps {
            item.explanation()
        } else {
            item.brief()
        }
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} ===", self.title)?;
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl Explain for Fixed {
        fn title(&self) -> &'static str {
            "FIXED"
        }

        fn steps(&self) -> Vec<String> {
            vec!["a = 1".to_owned(), String::new(), "b = 2".to_owned()]
        }

        fn summary(&self) -> Vec<String> {
            vec!["b = 2".to_owned()]
        }
    }

    #[test]
    fn test_steps_render_with_blank_separators() {
        let text = Explanation::of(&Fixed, true).to_string();
        assert_eq!(text, "=== FIXED ===\na = 1\n\nb = 2\n");
    }

    #[test]
    fn test_brief_uses_summary() {
        let explanation = Explanation::of(&Fixed, false);
        assert_eq!(explanation.title, "FIXED");
        assert_eq!(explanation.lines, vec!["b = 2".to_owned()]);
    }
}
