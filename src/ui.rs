use anyhow::{Context, Result};
use console::{Key, Style, Term};
use pwpanel::config::clamp_length;
use pwpanel::{
    CharClass, ColorTag, Configuration, RandomSource, StrengthResult, alphabet_size, entropy_bits,
    evaluate, regenerate,
};
use tracing::debug;
use zeroize::Zeroizing;

pub const PLACEHOLDER: &str = "P4$$wOrd";
pub const METER_WIDTH: usize = 20;

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
    pub quiet: bool,
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stdout)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn get_status_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("✓", "·")
    } else {
        ("x", " ")
    }
}

fn meter_glyphs(unicode_support: bool) -> (char, char) {
    if unicode_support {
        ('█', '░')
    } else {
        ('#', '-')
    }
}

fn color_style(color: ColorTag, options: &DisplayOptions) -> Style {
    if !options.color_support {
        return Style::new();
    }
    match color {
        ColorTag::Red => Style::new().red(),
        ColorTag::Orange => Style::new().color256(208),
        ColorTag::Yellow => Style::new().yellow(),
        ColorTag::Green => Style::new().green(),
    }
}

/// Strength bar filled to `score * 20` percent.
pub fn render_meter(strength: &StrengthResult, options: &DisplayOptions) -> String {
    let (full, empty) = meter_glyphs(options.unicode_support);
    let filled = METER_WIDTH * strength.proportion() as usize / 100;

    let bar: String = std::iter::repeat_n(full, filled)
        .chain(std::iter::repeat_n(empty, METER_WIDTH - filled))
        .collect();

    format!(
        "[{}] {:>3}%",
        color_style(strength.color, options).apply_to(bar),
        strength.proportion()
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    LengthUp,
    LengthDown,
    Toggle(CharClass),
    Regenerate,
    Quit,
}

pub fn action_for_key(key: &Key) -> Option<Action> {
    match key {
        Key::ArrowRight | Key::ArrowUp | Key::Char('+') | Key::Char('=') | Key::Char('k') => {
            Some(Action::LengthUp)
        }
        Key::ArrowLeft | Key::ArrowDown | Key::Char('-') | Key::Char('_') | Key::Char('j') => {
            Some(Action::LengthDown)
        }
        Key::Char('u') => Some(Action::Toggle(CharClass::Uppercase)),
        Key::Char('l') => Some(Action::Toggle(CharClass::Lowercase)),
        Key::Char('d') | Key::Char('n') => Some(Action::Toggle(CharClass::Digits)),
        Key::Char('s') => Some(Action::Toggle(CharClass::Symbols)),
        Key::Char('r') | Key::Char(' ') | Key::Enter => Some(Action::Regenerate),
        Key::Char('q') | Key::Escape => Some(Action::Quit),
        _ => None,
    }
}

/// Interactive state: the configuration, the password generated from it and
/// its strength. The core stays stateless; this struct sequences it.
pub struct Panel<R> {
    config: Configuration,
    password: Zeroizing<String>,
    strength: StrengthResult,
    rng: R,
}

impl<R: RandomSource> Panel<R> {
    /// Fails with [`pwpanel::Error::InvalidLength`] for a starting length
    /// outside the slider range; only key presses are clamped.
    pub fn new(config: Configuration, rng: R) -> Result<Self> {
        config.validate()?;
        let mut panel = Self {
            config,
            password: Zeroizing::new(String::new()),
            strength: evaluate(&config),
            rng,
        };
        panel.refresh()?;
        Ok(panel)
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn strength(&self) -> &StrengthResult {
        &self.strength
    }

    /// Whether there is anything worth copying.
    pub fn has_password(&self) -> bool {
        !self.password().is_empty()
    }

    fn regenerate(&mut self) -> Result<()> {
        self.password = regenerate(&self.config, &mut self.rng)?;
        Ok(())
    }

    fn refresh(&mut self) -> Result<()> {
        self.strength = evaluate(&self.config);
        self.regenerate()
    }

    /// Applies one action. Returns `false` once the panel should close.
    pub fn handle(&mut self, action: Action) -> Result<bool> {
        debug!(?action, "panel action");

        match action {
            Action::LengthUp | Action::LengthDown => {
                let length = match action {
                    Action::LengthUp => self.config.length.saturating_add(1),
                    _ => self.config.length.saturating_sub(1),
                };
                let length = clamp_length(length);
                if length != self.config.length {
                    self.config = self.config.with_length(length);
                    self.refresh()?;
                }
            }
            Action::Toggle(class) => {
                let classes = &mut self.config.classes;
                match class {
                    CharClass::Uppercase => classes.uppercase = !classes.uppercase,
                    CharClass::Lowercase => classes.lowercase = !classes.lowercase,
                    CharClass::Digits => classes.digits = !classes.digits,
                    CharClass::Symbols => classes.symbols = !classes.symbols,
                }
                self.refresh()?;
            }
            Action::Regenerate => self.regenerate()?,
            Action::Quit => return Ok(false),
        }

        Ok(true)
    }

    pub fn render(&self, options: &DisplayOptions) -> Vec<String> {
        let config = self.config();
        let strength = self.strength();
        let (check_on, check_off) = get_status_symbols(options.unicode_support);
        let dim = if options.color_support {
            Style::new().dim()
        } else {
            Style::new()
        };
        let bold = if options.color_support {
            Style::new().bold()
        } else {
            Style::new()
        };

        let mut lines = Vec::new();

        if self.has_password() {
            lines.push(format!("Out[0]: {}", bold.apply_to(self.password())));
        } else {
            lines.push(format!(
                "Out[0]: {}  {}",
                dim.apply_to(PLACEHOLDER),
                dim.apply_to("(nothing to copy)")
            ));
        }
        lines.push(String::new());

        lines.push(format!(
            "Length: {:>2}  {}",
            config.length,
            dim.apply_to("[-/+]")
        ));
        lines.push(String::new());

        for (class, key) in CharClass::ORDER.iter().zip(['u', 'l', 'd', 's']) {
            let mark = if class.is_enabled(&config.classes) {
                check_on
            } else {
                check_off
            };
            lines.push(format!(
                "[{}] {:<14} {}",
                mark,
                class.name(),
                dim.apply_to(format!("[{}]", key))
            ));
        }
        lines.push(String::new());

        lines.push("Strength:".to_string());
        lines.push(format!("  {}", render_meter(strength, options)));
        lines.push(format!(
            "  {}",
            color_style(strength.color, options).apply_to(strength.label)
        ));
        lines.push(String::new());

        lines.push(dim.apply_to("[r] regenerate   [q] quit").to_string());

        lines
    }
}

pub fn run_panel<R: RandomSource>(
    config: Configuration,
    rng: R,
    options: &DisplayOptions,
) -> Result<()> {
    let mut panel = Panel::new(config, rng)?;

    let term = Term::stdout();
    if !term.is_term() {
        anyhow::bail!("Interactive mode requires a terminal");
    }

    term.hide_cursor().ok();
    let result = panel_loop(&term, &mut panel, options);
    term.show_cursor().ok();

    result
}

fn panel_loop<R: RandomSource>(
    term: &Term,
    panel: &mut Panel<R>,
    options: &DisplayOptions,
) -> Result<()> {
    let mut drawn = 0;

    loop {
        if drawn > 0 {
            term.clear_last_lines(drawn)
                .context("Failed to clear control panel")?;
        }

        let lines = panel.render(options);
        for line in &lines {
            term.write_line(line)
                .context("Failed to draw control panel")?;
        }
        drawn = lines.len();

        let key = term.read_key().context("Failed to read key")?;
        let Some(action) = action_for_key(&key) else {
            continue;
        };

        if !panel.handle(action)? {
            break;
        }
    }

    Ok(())
}

pub fn display_output(
    password: &Zeroizing<String>,
    config: &Configuration,
    strength: &StrengthResult,
    options: &DisplayOptions,
) {
    if options.quiet {
        println!("{}", &**password);
        return;
    }

    if password.is_empty() {
        println!("Out[0]:\n(empty: no character class enabled)\n");
    } else {
        println!("Out[0]:\n{}\n", &**password);
    }

    display_settings(config, options);
    display_stats(password, config, strength, options);
}

fn display_settings(config: &Configuration, options: &DisplayOptions) {
    let (check_on, check_off) = get_status_symbols(options.unicode_support);

    println!("Settings:");
    println!("  ├─ Length     {} chars", config.length);
    println!("  ├─ Classes");

    for (i, class) in CharClass::ORDER.iter().enumerate() {
        let is_last = i == CharClass::ORDER.len() - 1;
        let prefix = if is_last { "│  └─" } else { "│  ├─" };
        let mark = if class.is_enabled(&config.classes) {
            check_on
        } else {
            check_off
        };
        println!("  {} [{}] {}", prefix, mark, class.name());
    }

    println!("  ├─ Keystream  ChaCha20 (256-bit)");
    println!("  └─ Sampling   Unbiased rejection");
    println!();
}

fn display_stats(
    password: &Zeroizing<String>,
    config: &Configuration,
    strength: &StrengthResult,
    options: &DisplayOptions,
) {
    let (check_ok, check_warn) = if options.unicode_support {
        ("✓", "!")
    } else {
        ("+", "!")
    };

    let charset_size = alphabet_size(config.classes);
    let entropy = entropy_bits(charset_size, password.len());
    let style = color_style(strength.color, options);
    let status_icon = if strength.score >= 4 {
        check_ok
    } else {
        check_warn
    };

    println!("Stats:");
    println!("  ├─ Charset    {} chars", charset_size);
    println!("  ├─ Entropy    {:.1} bits", entropy);
    println!(
        "  ├─ Score      {}",
        style.apply_to(format!(
            "{}/{}",
            strength.score,
            pwpanel::strength::MAX_SCORE
        ))
    );
    println!("  └─ Meter      {}", render_meter(strength, options));

    println!(
        "\n{} Strength: {}",
        style.apply_to(format!("[{}]", status_icon)),
        style.apply_to(strength.label)
    );
}
