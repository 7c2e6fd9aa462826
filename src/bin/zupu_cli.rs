use anyhow::{Context, Result, bail};
use chrono::{Datelike, Utc};
use serde::Serialize;
use std::{env, fs};
use zupu::DEMO_MEMBERS;
use zupu::layout::{LayoutParameters, TreeLayout};
use zupu::member::{MemberId, members_from_json};
use zupu::pedigree::Pedigree;
use zupu::render_svg::export_tree_svg;
use zupu::statistics::FamilyStatistics;
use zupu::tour::find_shortest_path;

#[derive(Serialize)]
struct PathSummary {
    start: MemberId,
    end: MemberId,
    found: bool,
    steps: Vec<MemberId>,
    names: Vec<String>,
}

fn usage() {
    eprintln!(
        "Usage:\n  \
  zupu_cli --version\n  \
  zupu_cli [--year YYYY] layout '<members-json>'\n  \
  zupu_cli [--year YYYY] stats '<members-json>'\n  \
  zupu_cli [--year YYYY] path '<members-json>' START_ID END_ID\n  \
  zupu_cli [--year YYYY] render-svg '<members-json>' OUTPUT.svg\n  \
  zupu_cli demo\n\n  \
  --year sets the reference year for age statistics (default: current year)\n  \
  Tip: pass @file.json instead of inline JSON"
    );
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_json_arg(value: &str) -> Result<String> {
    if let Some(path) = value.strip_prefix('@') {
        fs::read_to_string(path).with_context(|| format!("Could not read JSON file '{path}'"))
    } else {
        Ok(value.to_string())
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Could not serialize JSON output")?;
    println!("{text}");
    Ok(())
}

fn parse_global_year_arg(args: &[String]) -> Result<(i32, usize)> {
    if args.len() >= 3 && args[1] == "--year" {
        let year = args[2]
            .parse::<i32>()
            .with_context(|| format!("Invalid year '{}'", args[2]))?;
        return Ok((year, 3));
    }
    Ok((Utc::now().year(), 1))
}

fn parse_member_id(value: &str) -> Result<MemberId> {
    value
        .parse::<MemberId>()
        .with_context(|| format!("Invalid member id '{value}'"))
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    init_logging();

    let args: Vec<String> = env::args().collect();
    if args.len() <= 1 {
        usage();
        bail!("Missing command");
    }
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("zupu {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let (reference_year, cmd_idx) = parse_global_year_arg(&args)?;
    if args.len() <= cmd_idx {
        usage();
        bail!("Missing command");
    }

    let command = &args[cmd_idx];

    match command.as_str() {
        "layout" => {
            if args.len() <= cmd_idx + 1 {
                usage();
                bail!("Missing members JSON for layout");
            }
            let json = load_json_arg(&args[cmd_idx + 1])?;
            let pedigree = Pedigree::new_from_json(&json)?;
            let layout = TreeLayout::new_from_pedigree(&pedigree);
            print_json(&layout)
        }
        "stats" => {
            if args.len() <= cmd_idx + 1 {
                usage();
                bail!("Missing members JSON for stats");
            }
            let json = load_json_arg(&args[cmd_idx + 1])?;
            let members = members_from_json(&json)?;
            let statistics = FamilyStatistics::new_from_members(&members, reference_year);
            print_json(&statistics)
        }
        "path" => {
            if args.len() <= cmd_idx + 3 {
                usage();
                bail!("path requires: '<members-json>' START_ID END_ID");
            }
            let json = load_json_arg(&args[cmd_idx + 1])?;
            let start = parse_member_id(&args[cmd_idx + 2])?;
            let end = parse_member_id(&args[cmd_idx + 3])?;

            let pedigree = Pedigree::new_from_json(&json)?;
            let steps = find_shortest_path(&pedigree, start, end).unwrap_or_default();
            let names = steps
                .iter()
                .filter_map(|id| pedigree.get(*id))
                .map(|member| member.name.clone())
                .collect();
            print_json(&PathSummary {
                start,
                end,
                found: !steps.is_empty(),
                steps,
                names,
            })
        }
        "render-svg" => {
            if args.len() <= cmd_idx + 2 {
                usage();
                bail!("render-svg requires: '<members-json>' OUTPUT.svg");
            }
            let json = load_json_arg(&args[cmd_idx + 1])?;
            let output = &args[cmd_idx + 2];

            let pedigree = Pedigree::new_from_json(&json)?;
            let parameters = LayoutParameters::default();
            let layout = TreeLayout::new_from_pedigree_with_parameters(&pedigree, &parameters);
            let svg = export_tree_svg(&pedigree, &layout, &parameters);
            fs::write(output, svg)
                .with_context(|| format!("Could not write SVG output '{output}'"))?;
            println!("Wrote family tree SVG to '{output}'");
            Ok(())
        }
        "demo" => print_json(&*DEMO_MEMBERS),
        _ => {
            usage();
            bail!("Unknown command '{command}'");
        }
    }
}
