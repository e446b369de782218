//! Local landing-page template.
//!
//! Renders the same page the hosted generation service produces: a fixed
//! layout (navigation, hero, about, services, contact form, footer) with the
//! title, description and prompt substituted in. The markup links
//! `styles.css` and `script.js`, the names used by `deepsite export`.

use async_trait::async_trait;
use chrono::{Datelike, Utc};

use super::GenerationBackend;
use crate::{GeneratedContent, Prompt, Result, Session};

const HTML_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{{title}}</title>
  <link rel="stylesheet" href="styles.css">
</head>
<body>
  <header>
    <nav>
      <div class="logo">{{title}}</div>
      <ul class="nav-links">
        <li><a href="#home">Home</a></li>
        <li><a href="#about">About</a></li>
        <li><a href="#services">Services</a></li>
        <li><a href="#contact">Contact</a></li>
      </ul>
    </nav>
  </header>

  <section id="hero">
    <div class="hero-content">
      <h1>Welcome to {{title}}</h1>
      <p>{{description}}</p>
      <button class="cta-button">Get Started</button>
    </div>
  </section>

  <section id="about">
    <div class="container">
      <h2>About Us</h2>
      <p>We are a company dedicated to providing excellent services related to {{prompt}}.</p>
    </div>
  </section>

  <section id="services">
    <div class="container">
      <h2>Our Services</h2>
      <div class="services-grid">
        <div class="service-card">
          <h3>Service 1</h3>
          <p>Description of service 1</p>
        </div>
        <div class="service-card">
          <h3>Service 2</h3>
          <p>Description of service 2</p>
        </div>
        <div class="service-card">
          <h3>Service 3</h3>
          <p>Description of service 3</p>
        </div>
      </div>
    </div>
  </section>

  <section id="contact">
    <div class="container">
      <h2>Contact Us</h2>
      <form>
        <div class="form-group">
          <label for="name">Name</label>
          <input type="text" id="name" name="name">
        </div>
        <div class="form-group">
          <label for="email">Email</label>
          <input type="email" id="email" name="email">
        </div>
        <div class="form-group">
          <label for="message">Message</label>
          <textarea id="message" name="message"></textarea>
        </div>
        <button type="submit">Send Message</button>
      </form>
    </div>
  </section>

  <footer>
    <div class="container">
      <p>&copy; {{year}} {{title}}. All rights reserved.</p>
    </div>
  </footer>

  <script src="script.js"></script>
</body>
</html>
"##;

const CSS_TEMPLATE: &str = r"/* Global Styles */
* {
  margin: 0;
  padding: 0;
  box-sizing: border-box;
}

body {
  font-family: 'Arial', sans-serif;
  line-height: 1.6;
  color: #333;
}

.container {
  max-width: 1200px;
  margin: 0 auto;
  padding: 2rem;
}

/* Header */
header {
  background-color: #fff;
  box-shadow: 0 2px 5px rgba(0,0,0,0.1);
  position: fixed;
  top: 0;
  left: 0;
  right: 0;
  z-index: 100;
}

nav {
  display: flex;
  justify-content: space-between;
  align-items: center;
  padding: 1rem 2rem;
}

.logo {
  font-size: 1.5rem;
  font-weight: bold;
  color: #5928e5;
}

.nav-links {
  display: flex;
  list-style: none;
}

.nav-links li {
  margin-left: 2rem;
}

.nav-links a {
  text-decoration: none;
  color: #333;
  font-weight: 500;
  transition: color 0.3s ease;
}

.nav-links a:hover {
  color: #5928e5;
}

/* Hero Section */
#hero {
  height: 100vh;
  background: linear-gradient(to right, #5928e5, #4285f4);
  display: flex;
  align-items: center;
  justify-content: center;
  text-align: center;
  color: white;
  padding: 2rem;
}

.hero-content {
  max-width: 800px;
}

.hero-content h1 {
  font-size: 3rem;
  margin-bottom: 1.5rem;
}

.hero-content p {
  font-size: 1.2rem;
  margin-bottom: 2rem;
}

.cta-button {
  padding: 1rem 2rem;
  background: white;
  color: #5928e5;
  border: none;
  border-radius: 4px;
  font-size: 1rem;
  font-weight: bold;
  cursor: pointer;
  transition: all 0.3s ease;
}

.cta-button:hover {
  background: rgba(255,255,255,0.9);
  transform: translateY(-2px);
}

/* About Section */
#about {
  padding: 8rem 0;
  background-color: #f9f9f9;
}

#about h2 {
  font-size: 2.5rem;
  margin-bottom: 2rem;
  text-align: center;
}

/* Services Section */
#services {
  padding: 8rem 0;
}

#services h2 {
  font-size: 2.5rem;
  margin-bottom: 3rem;
  text-align: center;
}

.services-grid {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
  gap: 2rem;
}

.service-card {
  background: white;
  padding: 2rem;
  border-radius: 8px;
  box-shadow: 0 5px 15px rgba(0,0,0,0.1);
  transition: transform 0.3s ease;
}

.service-card:hover {
  transform: translateY(-10px);
}

.service-card h3 {
  font-size: 1.5rem;
  margin-bottom: 1rem;
  color: #5928e5;
}

/* Contact Section */
#contact {
  padding: 8rem 0;
  background-color: #f9f9f9;
}

#contact h2 {
  font-size: 2.5rem;
  margin-bottom: 3rem;
  text-align: center;
}

form {
  max-width: 600px;
  margin: 0 auto;
}

.form-group {
  margin-bottom: 1.5rem;
}

label {
  display: block;
  margin-bottom: 0.5rem;
  font-weight: 500;
}

input, textarea {
  width: 100%;
  padding: 0.75rem;
  border: 1px solid #ddd;
  border-radius: 4px;
  font-size: 1rem;
}

textarea {
  height: 150px;
}

form button {
  padding: 1rem 2rem;
  background: #5928e5;
  color: white;
  border: none;
  border-radius: 4px;
  font-size: 1rem;
  font-weight: bold;
  cursor: pointer;
  transition: background 0.3s ease;
}

form button:hover {
  background: #4920c5;
}

/* Footer */
footer {
  background: #333;
  color: white;
  text-align: center;
  padding: 2rem 0;
}

/* Responsive */
@media (max-width: 768px) {
  nav {
    flex-direction: column;
    padding: 1rem;
  }

  .nav-links {
    margin-top: 1rem;
  }

  .nav-links li {
    margin-left: 1rem;
    margin-right: 1rem;
  }

  .hero-content h1 {
    font-size: 2.5rem;
  }
}
";

const JS_TEMPLATE: &str = r##"document.addEventListener('DOMContentLoaded', function() {
  // Smooth scrolling for navigation links
  document.querySelectorAll('a[href^="#"]').forEach(anchor => {
    anchor.addEventListener('click', function (e) {
      e.preventDefault();

      document.querySelector(this.getAttribute('href')).scrollIntoView({
        behavior: 'smooth'
      });
    });
  });

  // Form submission
  const form = document.querySelector('form');
  if (form) {
    form.addEventListener('submit', function(e) {
      e.preventDefault();
      alert('Thank you for your message. We will get back to you soon!');
      form.reset();
    });
  }

  // Fade sections in on scroll
  const sections = document.querySelectorAll('section');

  window.addEventListener('scroll', function() {
    const windowHeight = window.innerHeight;
    const scrollY = window.scrollY;

    sections.forEach(section => {
      const sectionTop = section.offsetTop;
      const sectionHeight = section.offsetHeight;

      if (scrollY > sectionTop - windowHeight + sectionHeight / 3) {
        section.classList.add('fade-in');
      }
    });
  });

  console.log({{prompt_literal}} + ' loaded successfully');
});
"##;

/// Generation backend that renders the built-in landing-page template.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateBackend {
    year: Option<i32>,
}

impl TemplateBackend {
    /// Template stamped with the current year
    #[must_use]
    pub const fn new() -> Self {
        Self { year: None }
    }

    /// Template stamped with a fixed footer year (reproducible output)
    #[must_use]
    pub const fn with_year(year: i32) -> Self {
        Self { year: Some(year) }
    }

    /// Render the full page set for `prompt`
    #[must_use]
    pub fn render(&self, prompt: &Prompt) -> GeneratedContent {
        let title = format!("{} Website", prompt.leading_words(3));
        let description = format!("A beautiful website about {prompt}");
        let year = self.year.unwrap_or_else(|| Utc::now().year());

        let html_content = HTML_TEMPLATE
            .replace("{{title}}", &escape_html(&title))
            .replace("{{description}}", &escape_html(&description))
            .replace("{{prompt}}", &escape_html(prompt.as_str()))
            .replace("{{year}}", &year.to_string());

        // serde_json produces a valid JS string literal, quotes included
        let prompt_literal = serde_json::Value::String(format!("Website for {prompt}")).to_string();
        let js_content = JS_TEMPLATE.replace("{{prompt_literal}}", &prompt_literal);

        GeneratedContent {
            title,
            description,
            html_content,
            css_content: CSS_TEMPLATE.to_string(),
            js_content,
        }
    }
}

#[async_trait]
impl GenerationBackend for TemplateBackend {
    async fn generate(
        &self,
        prompt: &Prompt,
        _session: Option<&Session>,
    ) -> Result<GeneratedContent> {
        Ok(self.render(prompt))
    }

    fn name(&self) -> &'static str {
        "template"
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            // keeps user text from forming template placeholders
            '{' => escaped.push_str("&#123;"),
            '}' => escaped.push_str("&#125;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
