use crate::{GeneratedContent, Prompt};

/// Placeholder content synthesized from the prompt alone.
///
/// Pure and total: used whenever the generation backend cannot deliver, so
/// it never touches the network or the clock.
///
/// ```rust
/// use deepsite_core::{Prompt, generator::fallback_content};
///
/// let prompt = Prompt::new("A modern portfolio website for a UX designer")?;
/// let content = fallback_content(&prompt);
///
/// assert_eq!(content.title, "Website about A modern portfolio");
/// assert_eq!(
///     content.description,
///     "A beautiful website about A modern portfolio website for a UX designer"
/// );
/// # Ok::<(), deepsite_core::Error>(())
/// ```
#[must_use]
pub fn fallback_content(prompt: &Prompt) -> GeneratedContent {
    GeneratedContent {
        title: format!("Website about {}", prompt.leading_words(3)),
        description: format!("A beautiful website about {prompt}"),
        html_content: format!(
            r#"<div class="container"><h1>Hello World</h1><p>This is a website about {prompt}</p></div>"#
        ),
        css_content: ".container { max-width: 1200px; margin: 0 auto; padding: 2rem; }".to_string(),
        js_content: "console.log('Website loaded');".to_string(),
    }
}
