use owo_colors::Style;

// Stylesheet used to colorize prints.
#[derive(Debug, Default)]
pub(crate) struct Styles {
    pub title_style: Style,
    pub key_style: Style,
    pub value_style: Style,
    pub warning_style: Style,
}

impl Styles {
    pub(crate) fn colorize(&mut self) {
        self.title_style = Style::new().bold().bright_blue();
        self.key_style = Style::new().bright_green();
        self.value_style = Style::new().bright_white();
        self.warning_style = Style::new().bold().yellow();
    }

    /// A stylesheet which colorizes only when stdout supports it
    pub(crate) fn for_stdout() -> Self {
        let mut styles = Self::default();
        if supports_color::on(supports_color::Stream::Stdout).is_some() {
            styles.colorize();
        }
        styles
    }
}
