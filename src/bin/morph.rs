// ru-morph Lookup CLI
// Command-line interface for word forms, tags, and phrase declensions

use std::path::PathBuf;

use clap::Parser;
use ru_morph::{tag_pos, MorphAnalyzer};

/// Russian morphology lookup - word forms, OpenCorpora tags, and
/// phrase declensions with agreement
#[derive(Parser, Debug)]
#[command(name = "morph")]
#[command(about = "Look up Russian word forms, tags, and phrase declensions", long_about = None)]
#[command(version)]
struct Args {
    /// Word or phrase to analyze (phrase mode is auto-detected when
    /// the input contains whitespace)
    #[arg(value_name = "INPUT")]
    input: String,

    /// Print the primary OpenCorpora tag instead of forms
    #[arg(short, long)]
    tag: bool,

    /// Force phrase concordance mode
    #[arg(short, long)]
    phrase: bool,

    /// Dictionary directory (overrides RU_MORPH_DICT_DIR)
    #[arg(short, long, value_name = "PATH")]
    dict_dir: Option<PathBuf>,

    /// Maximum number of forms to display
    #[arg(short, long, default_value = "50")]
    limit: usize,

    /// Show dictionary details
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
        println!("🔍 Loading dictionary...");
    }

    let dict_dir = args.dict_dir.clone().unwrap_or_else(ru_morph::dict_dir);
    let morph = MorphAnalyzer::from_dir(&dict_dir)?;

    if args.verbose {
        println!("✅ Dictionary loaded from {}\n", dict_dir.display());
    }

    if args.tag {
        let tag = morph.tag(&args.input);
        if tag.is_empty() {
            println!("❌ Word not found in the dictionary.");
        } else {
            println!("{:<6} {}", tag_pos(&tag), tag);
        }
        return Ok(());
    }

    let forms = if args.phrase || args.input.trim().contains(char::is_whitespace) {
        morph.phrase_forms_concordant(&args.input)
    } else {
        morph.word_forms(&args.input)
    };

    if forms.is_empty() {
        println!("❌ No forms found.");
        return Ok(());
    }

    println!("✅ Found {} forms:\n", forms.len());
    for (idx, form) in forms.iter().take(args.limit).enumerate() {
        println!("{}. {}", idx + 1, form);
    }
    if forms.len() > args.limit {
        println!("... and {} more (raise --limit to see them)", forms.len() - args.limit);
    }

    Ok(())
}
