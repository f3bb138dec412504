use reaclib_forge::{IngestStats, Reaction};
use std::path::Path;

/// Roles a summary fragment can play; each maps to one SGR sequence.
#[derive(Clone, Copy)]
enum Tone {
    Title,
    Section,
    Key,
    Count,
    Reaction,
    Warning,
    Faint,
}

impl Tone {
    fn sgr(self) -> &'static str {
        match self {
            Tone::Title => "1;36",
            Tone::Section => "90",
            Tone::Key => "34",
            Tone::Count => "32",
            Tone::Reaction => "1;32",
            Tone::Warning => "33",
            Tone::Faint => "2",
        }
    }
}

struct Palette {
    enabled: bool,
}

impl Palette {
    fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn tone(&self, s: impl AsRef<str>, tone: Tone) -> String {
        if self.enabled { format!("\x1b[{}m{}\x1b[0m", tone.sgr(), s.as_ref()) } else { s.as_ref().to_string() }
    }

    fn faint(&self, s: impl AsRef<str>) -> String {
        self.tone(s, Tone::Faint)
    }
}

/// Print the ingest summary to stderr, so stdout stays clean for generated output.
pub fn print_ingest(input: &Path, stats: &IngestStats, reactions: &[Reaction], output: Option<&Path>, color: bool) {
    let palette = Palette::new(color);
    eprintln!("\n{}", palette.tone(format!("⚙  Ingest: {}", input.display()), Tone::Title));

    eprintln!("\n{}", palette.tone("━━━ Entries ━━━", Tone::Section));
    eprintln!(
        "  {} {}  {} {}",
        palette.tone("read:", Tone::Key),
        stats.entries,
        palette.tone("included:", Tone::Key),
        palette.tone(stats.included.to_string(), Tone::Count),
    );
    print_bucket(&palette, "format", stats.format_skipped);
    print_bucket(&palette, "species", stats.species_skipped);
    print_bucket(&palette, "conservation", stats.conservation_skipped);
    print_bucket(&palette, "culled", stats.culled);

    if !reactions.is_empty() {
        eprintln!("\n{}", palette.tone("━━━ Reactions ━━━", Tone::Section));
        for (idx, r) in reactions.iter().take(5).enumerate() {
            eprintln!(
                "  {} {} {} {}",
                palette.tone(format!("[{idx}]"), Tone::Section),
                palette.tone(&r.rp_name, Tone::Reaction),
                palette.faint("│"),
                palette.tone(format!("{} Q={:.3} MeV", r.label, r.q_value), Tone::Warning),
            );
        }
        if reactions.len() > 5 {
            eprintln!("  {}", palette.faint(format!("... +{} more", reactions.len() - 5)));
        }
    }

    eprintln!("\n{}", palette.tone("━━━ Timing ━━━", Tone::Section));
    eprintln!("  Total: {}", palette.tone(format!("{:?}", stats.elapsed), Tone::Count));
    if let Some(path) = output {
        eprintln!("  Output: {}", palette.faint(path.display().to_string()));
    }
    eprintln!();
}

pub fn print_partition(input: &Path, written: usize, skipped: usize, output: &Path, color: bool) {
    let palette = Palette::new(color);
    eprintln!("\n{}", palette.tone(format!("⚙  Partition: {}", input.display()), Tone::Title));
    eprintln!(
        "  {} {}  │  {} {}",
        palette.tone("written:", Tone::Key),
        palette.tone(written.to_string(), Tone::Count),
        palette.tone("skipped:", Tone::Key),
        if skipped > 0 { palette.tone(skipped.to_string(), Tone::Warning) } else { palette.faint("0") },
    );
    eprintln!("  Output: {}\n", palette.faint(output.display().to_string()));
}

fn print_bucket(palette: &Palette, name: &str, count: usize) {
    let value = if count > 0 { palette.tone(format!("✗ {count}"), Tone::Warning) } else { palette.faint("✓ 0") };
    eprintln!("    {} {}", palette.faint(format!("{name:<13}")), value);
}
