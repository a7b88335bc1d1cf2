use crate::cli::commands::ListArgs;
use crate::cli::output::SymbolJson;
use crate::model::Catalog;
use crate::ops::rank::rank;
use crate::session::ItemSource;
use crate::source::SymbolSource;

/// `tsf list <file> [query]`: populate, rank, print. Same ranker as the
/// interactive panel, so the order (bucket rule, stable ties) is
/// identical.
pub fn cmd_list(args: ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut source = SymbolSource::from_file(&args.file)?;
    let mut catalog = Catalog::new();
    source.populate(&mut catalog);

    let query = args.query.unwrap_or_default();
    let rows = rank(&query, &catalog);

    if args.json {
        let out: Vec<SymbolJson> = rows
            .iter()
            .filter_map(|row| catalog.get(row.index).map(|e| (row, e)))
            .map(|(row, entry)| SymbolJson {
                label: entry.label.clone(),
                score: row.score,
                line: entry.target.line,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let width = rows
        .iter()
        .filter_map(|row| catalog.get(row.index))
        .map(|e| e.label.chars().count())
        .max()
        .unwrap_or(0);
    for row in &rows {
        if let Some(entry) = catalog.get(row.index) {
            println!(
                "{:<width$}  {:>6}  {}",
                entry.label, row.score, entry.target.line
            );
        }
    }
    Ok(())
}
