use chrono::NaiveDate;
use poster_layout::Color;

pub const DEFAULT_CREDIT_TEXT: &str = "Created with the\nBook Poster Creator by N. Römheld";
pub const DEFAULT_CREDIT_URL: &str = "https://github.com/n-roemheld/book-poster";

/// Options for drawing a resolved layout
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Overrides the generated "Books read between .." title
    pub title: Option<String>,
    /// Right signature text, may span several lines
    pub credit_text: String,
    /// Encoded in the right QR code
    pub credit_url: String,
    /// Encoded in the left QR code; the left signature is skipped without it
    pub profile_url: Option<String>,
    pub user_name: String,
    pub text_color: Color,
    pub outline_color: Color,
    /// Covers whose aspect ratio is within this factor of the target are
    /// stretched to fill the cover area
    pub stretch_tolerance: f64,
    /// Only books read on or after this date
    pub from: Option<NaiveDate>,
    /// Only books read on or before this date
    pub to: Option<NaiveDate>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: None,
            credit_text: DEFAULT_CREDIT_TEXT.to_string(),
            credit_url: DEFAULT_CREDIT_URL.to_string(),
            profile_url: None,
            user_name: "me".to_string(),
            text_color: Color::BLACK,
            outline_color: Color::BLACK,
            stretch_tolerance: 1.15,
            from: None,
            to: None,
        }
    }
}

impl RenderOptions {
    /// Text next to the profile QR code
    pub fn follow_text(&self) -> String {
        format!("Follow {} on Goodreads!", self.user_name)
    }
}
