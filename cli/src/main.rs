//! svgrewire CLI — driving adapter for the configuration rewrite.
//!
//! Subcommands:
//! - `apply <config>` — rewrite the config and print the result as JSON
//! - `check <config>` — report whether the rewrite would succeed
//! - `resolve <config> <request>` — show which loaders a request resolves to

use std::process;

use svgrewire::{transform, BuildConfig, Request};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "apply" => cmd_apply(&args[2..]),
        "check" => cmd_check(&args[2..]),
        "resolve" => cmd_resolve(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("error: unknown command \"{other}\"");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_apply(args: &[String]) -> Result<(), String> {
    if args.is_empty() {
        return Err("apply requires a config file path".into());
    }

    let mut config = load_config(&args[0])?;
    transform(&mut config).map_err(|e| format!("rewrite failed: {e}"))?;

    let output =
        serde_json::to_string_pretty(&config).map_err(|e| format!("JSON encode error: {e}"))?;
    println!("{output}");
    Ok(())
}

fn cmd_check(args: &[String]) -> Result<(), String> {
    if args.is_empty() {
        return Err("check requires a config file path".into());
    }

    let mut config = load_config(&args[0])?;
    let before = config.rules.len();
    transform(&mut config).map_err(|e| format!("rewrite would fail: {e}"))?;

    println!(
        "Config ok: {before} rule(s) in, {} rule(s) out",
        config.rules.len()
    );
    Ok(())
}

fn cmd_resolve(args: &[String]) -> Result<(), String> {
    if args.len() < 2 {
        return Err("resolve requires a config file path and a request".into());
    }

    let mut config = load_config(&args[0])?;
    transform(&mut config).map_err(|e| format!("rewrite failed: {e}"))?;

    let request = Request::parse(&args[1]);
    let mut matched = false;
    for rule in &config.rules {
        if let Some(spec) = rule.select(&request) {
            matched = true;
            println!("rule {}:", rule.test);
            for loader in spec.loaders() {
                println!("  {}", loader.loader);
            }
        }
    }
    if !matched {
        println!("(no rule matched)");
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Config loading
// ═══════════════════════════════════════════════════════════════════════════════

fn load_config(path: &str) -> Result<BuildConfig, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read \"{path}\": {e}"))?;

    let is_json = std::path::Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content).map_err(|e| format!("JSON parse error: {e}"))
    } else {
        // Default to YAML (handles .yaml and .yml)
        serde_yaml::from_str(&content).map_err(|e| format!("YAML parse error: {e}"))
    }
}

fn print_usage() {
    eprintln!(
        "Usage: svgrewire <command> [options]

Commands:
  apply <config>              Rewrite the config, print the result as JSON
  check <config>              Report whether the rewrite would succeed
  resolve <config> <request>  Show the loaders a request resolves to
  help                        Show this help"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_config_missing_file() {
        let result = load_config("/nonexistent/config.json");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("failed to read"));
    }

    #[test]
    fn apply_requires_a_path() {
        assert!(cmd_apply(&[]).is_err());
        assert!(cmd_check(&[]).is_err());
        assert!(cmd_resolve(&["only-one".into()]).is_err());
    }
}
