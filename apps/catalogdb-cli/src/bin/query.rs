use std::env;

use catalogdb_cli::{init_tracing, load_catalog, progress_bar};
use catalogdb_core::config::Config;

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <query> [--size N] [--seed S] [--json]", program);
    eprintln!("Example: {} 'wireles mouse' --size 100000 --seed 7", program);
    std::process::exit(1);
}

fn number<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i + 1).and_then(|v| v.parse().ok()) {
        Some(n) => n,
        None => { eprintln!("Error: {} requires a number", flag); std::process::exit(1); }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing("warn");
    let mut settings = Config::load()
        .and_then(|c| c.settings())
        .map_err(|e| { eprintln!("Error loading config: {}", e); e })?;

    let args: Vec<String> = env::args().collect();
    let program = args.first().cloned().unwrap_or_else(|| "catalogdb-query".to_string());
    let mut query = None; let mut json = false;
    let mut i = 1; while i < args.len() { match args[i].as_str() {
        "--size" => { settings.catalog.size = number(&args, i, "--size"); i += 1; }
        "--seed" => { settings.catalog.seed = Some(number(&args, i, "--seed")); i += 1; }
        "--json" => json = true,
        "--help" | "-h" => usage(&program),
        a if !a.starts_with('-') => query = Some(a.to_string()),
        other => { eprintln!("Error: unknown flag {}", other); usage(&program) } } i += 1; }
    let Some(query) = query else { usage(&program) };

    let service = load_catalog(&settings, progress_bar()?)?;
    let results = service.search(&query)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&results.records)?);
    } else {
        println!("\n🔍 {} of {} hits for \"{}\" ({:.2} ms)", results.meta.returned, results.meta.total_hits, query, results.meta.elapsed.as_secs_f64() * 1000.0);
        for (rank, record) in results.records.iter().enumerate() {
            println!("  {:>2}. #{:<8} {}  [{}]", rank + 1, record.id, record.name, record.category);
        }
        if results.meta.skipped > 0 { println!("⚠️  {} hits had no catalog record", results.meta.skipped); }
    }
    service.shutdown()?;
    Ok(())
}
