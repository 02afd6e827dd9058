use std::path::Path;

use colored::Colorize;
use parley_games::catalog::VariantRules;

pub fn run(catalog: Option<&Path>, variant: &str) -> Result<(), String> {
    let catalog = super::load_catalog(catalog)?;
    let def = catalog.find(variant).map_err(|e| e.to_string())?;

    println!("  {} [{}]", def.name.bold(), def.id().to_string().dimmed());
    println!();
    println!("  {}", def.description);
    println!();
    println!("  points:     {} per {}", def.points_per_unit, unit(&def.rules));
    println!("  time limit: {}s", def.time_limit_seconds);

    match &def.rules {
        VariantRules::Trivia { questions } => {
            println!("  questions:  {}", questions.len());
        }
        VariantRules::WordChain {
            max_guesses,
            levels,
        } => {
            println!("  max wrong:  {max_guesses}");
            println!();
            println!("  {}", "Levels".bold());
            for level in levels {
                println!(
                    "    {:<8} {} ({} words)",
                    level.name,
                    level.category,
                    level.words.len()
                );
            }
        }
        VariantRules::EmojiPictionary { phrases } => {
            println!("  phrases:    {}", phrases.len());
        }
    }

    Ok(())
}

fn unit(rules: &VariantRules) -> &'static str {
    match rules {
        VariantRules::Trivia { .. } => "correct answer",
        VariantRules::WordChain { .. } => "solved word",
        VariantRules::EmojiPictionary { .. } => "solved phrase",
    }
}
