use pvp_duel_matrix::duel::MAX_SHIELDS;
use pvp_duel_matrix::league::LeagueCap;
use pvp_duel_matrix::policy::ThrowChoice;
use pvp_duel_matrix::{run, CliOptions};
use std::env;
use std::path::PathBuf;

fn usage() -> ! {
    eprintln!(
        "Usage: cargo run --release -- [--gamemaster gamemaster.json] [--picks picks.json] \
[--league great|ultra|master|CAP] [--my-shields N] [--foe-shields N] \
[--policy greedy|bait] [--output matrix.csv] [--json]"
    );
    std::process::exit(1);
}

fn parse_args() -> anyhow::Result<CliOptions> {
    let mut opts = CliOptions::default();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--gamemaster" => {
                opts.gamemaster_path = args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--gamemaster requires a path (e.g. --gamemaster gamemaster.json)")
                })?;
            }
            "--picks" => {
                opts.picks_path = args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--picks requires a path (e.g. --picks picks.json)")
                })?;
            }
            "--league" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--league requires great, ultra, master or a CP cap"))?;
                opts.league = match val.to_ascii_lowercase().as_str() {
                    "great" | "ultra" | "master" => LeagueCap::from_name(&val),
                    other => match other.parse::<f64>() {
                        Ok(cap) if cap > 0.0 => LeagueCap::Limit(cap),
                        _ => anyhow::bail!(
                            "Unknown league {other} (use great, ultra, master or a positive CP cap)"
                        ),
                    },
                };
            }
            "--my-shields" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--my-shields requires a number"))?;
                opts.my_shields = parse_shields(&val)?;
            }
            "--foe-shields" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--foe-shields requires a number"))?;
                opts.foe_shields = parse_shields(&val)?;
            }
            "--policy" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--policy requires greedy or bait"))?;
                opts.throw_policy = match val.to_ascii_lowercase().as_str() {
                    "greedy" => ThrowChoice::Greedy,
                    "bait" => ThrowChoice::Bait,
                    other => anyhow::bail!("Unknown policy {other} (use greedy or bait)"),
                };
            }
            "--output" => {
                opts.output_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--output requires a path (e.g. --output matrix.csv)")
                })?);
            }
            "--json" => {
                opts.json = true;
            }
            "--help" | "-h" => usage(),
            other => return Err(anyhow::anyhow!("Unknown argument {other}")),
        }
    }

    Ok(opts)
}

fn parse_shields(val: &str) -> anyhow::Result<u8> {
    let n: u8 = val.parse()?;
    if n > MAX_SHIELDS {
        anyhow::bail!("Shields must be 0 to {MAX_SHIELDS}, got {n}");
    }
    Ok(n)
}

fn main() -> anyhow::Result<()> {
    let opts = parse_args()?;
    run(opts)
}
