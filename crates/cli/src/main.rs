// kwsum CLI - headless keyword consolidation
//
// One command: submit an input file, run the pipeline, receive the
// consolidated workbook. The interactive shell that used to host this
// pipeline is out of scope; this binary is the whole host surface.

mod exit_codes;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{debug, info};

use kwsum_engine::aggregate::{
    consolidate_grids, consolidate_text, Outcome, PipelineOptions, Strategy,
};
use kwsum_engine::grid::PrimaryKeywordRule;
use kwsum_io::{text, xlsx};

use exit_codes::{EXIT_ERROR, EXIT_NO_TOKENS, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "kwsum")]
#[command(about = "Consolidate delimiter-separated keyword lists into one spreadsheet")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the consolidation pipeline over one input file
    #[command(after_help = "\
Examples:
  kwsum consolidate listes.xlsx --strategy count
  kwsum consolidate listes.xlsx --strategy sheets -o consolidation.xlsx
  kwsum consolidate listes.xlsx --strategy primary --keywords-only
  kwsum consolidate modele.xlsx --strategy primary --primary-row 2 --primary-cols 0,3
  cat mots.txt | kwsum consolidate - --from text --strategy count
  kwsum consolidate listes.xlsx --strategy bare --preview-json")]
    Consolidate(ConsolidateArgs),
}

#[derive(Args)]
struct ConsolidateArgs {
    /// Input file (use "-" to read from stdin)
    input: PathBuf,

    /// Aggregation strategy
    #[arg(long, short = 's', value_enum)]
    strategy: StrategyArg,

    /// Input format (sniffed from the file extension when omitted)
    #[arg(long, short = 'f', value_enum)]
    from: Option<InputFormat>,

    /// Declared text encoding (strict). Without it, text input is decoded
    /// as UTF-8 with a Windows-1252 fallback.
    #[arg(long)]
    encoding: Option<String>,

    /// Token delimiter inside composite cells
    #[arg(long, default_value_t = '|')]
    delimiter: char,

    /// Drop purely numeric/percentage tokens
    #[arg(long)]
    keywords_only: bool,

    /// Zero-based row holding the primary-keyword cells
    #[arg(long, default_value_t = 4, value_name = "ROW")]
    primary_row: usize,

    /// Zero-based columns of the two primary-keyword cells
    #[arg(long, value_delimiter = ',', num_args = 2, default_values_t = [0, 1], value_name = "A,B")]
    primary_cols: Vec<usize>,

    /// Output file (defaults to the strategy's suggested name)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Print the result table as JSON to stdout instead of writing a workbook
    #[arg(long)]
    preview_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// Global frequency count across all input
    Count,
    /// One row per sheet: sheet name + unique keyword list
    Sheets,
    /// One row per sheet: primary keyword + unique keyword list
    Primary,
    /// One bare unique-keyword row per sheet, no header
    Bare,
}

impl StrategyArg {
    fn to_strategy(self) -> Strategy {
        match self {
            StrategyArg::Count => Strategy::FrequencyCount,
            StrategyArg::Sheets => Strategy::UniqueListPerGroup,
            StrategyArg::Primary => Strategy::PrimaryKeywordPerGroup,
            StrategyArg::Bare => Strategy::UniqueListUnlabeled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    /// Spreadsheet container (xlsx, xlsm, xlsb, xls, ods)
    Workbook,
    /// Flat text, one keyword list per line
    Text,
}

fn sniff_format(path: &Path) -> Option<InputFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(InputFormat::Workbook),
        "txt" | "text" | "csv" | "lst" => Some(InputFormat::Text),
        _ => None,
    }
}

fn read_input(path: &Path) -> io::Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer)?;
        Ok(buffer)
    } else {
        fs::read(path)
    }
}

fn run_consolidate(args: &ConsolidateArgs) -> Result<u8, String> {
    let format = match args.from.or_else(|| sniff_format(&args.input)) {
        Some(format) => format,
        None => {
            eprintln!(
                "cannot infer input format from '{}'; pass --from workbook|text",
                args.input.display()
            );
            return Ok(EXIT_USAGE);
        }
    };

    let strategy = args.strategy.to_strategy();
    if format == InputFormat::Text && strategy != Strategy::FrequencyCount {
        eprintln!("text input only supports the frequency count strategy (--strategy count)");
        return Ok(EXIT_USAGE);
    }

    let opts = PipelineOptions {
        delimiter: args.delimiter,
        keywords_only: args.keywords_only,
        primary_rule: PrimaryKeywordRule {
            row: args.primary_row,
            cols: (args.primary_cols[0], args.primary_cols[1]),
        },
    };

    let bytes = read_input(&args.input)
        .map_err(|e| format!("failed to read '{}': {}", args.input.display(), e))?;

    let outcome = match format {
        InputFormat::Workbook => {
            let grids = xlsx::read_workbook(&bytes).map_err(|e| e.to_string())?;
            debug!("loaded {} sheets from '{}'", grids.len(), args.input.display());
            consolidate_grids(&grids, strategy, &opts)
        }
        InputFormat::Text => {
            let content = match &args.encoding {
                Some(label) => text::read_text_as(&bytes, label).map_err(|e| e.to_string())?,
                None => text::read_text(&bytes),
            };
            consolidate_text(&content, &opts)
        }
    };

    let table = match outcome {
        Outcome::Table(table) => table,
        Outcome::NoTokens => {
            eprintln!("no keyword tokens found; nothing to consolidate");
            return Ok(EXIT_NO_TOKENS);
        }
    };

    if args.preview_json {
        let json = serde_json::to_string_pretty(&table).map_err(|e| e.to_string())?;
        println!("{json}");
        return Ok(EXIT_SUCCESS);
    }

    let artifact = xlsx::write_table(&table).map_err(|e| e.to_string())?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&table.file_name));
    fs::write(&output, artifact)
        .map_err(|e| format!("failed to write '{}': {}", output.display(), e))?;

    info!("wrote {} records to '{}'", table.rows.len(), output.display());
    println!("{}", output.display());
    Ok(EXIT_SUCCESS)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Consolidate(args) => match run_consolidate(&args) {
            Ok(code) => code,
            Err(message) => {
                eprintln!("error: {message}");
                EXIT_ERROR
            }
        },
    };
    ExitCode::from(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kwsum_engine::table::ResultTable;

    fn default_args(input: PathBuf) -> ConsolidateArgs {
        ConsolidateArgs {
            input,
            strategy: StrategyArg::Count,
            from: None,
            encoding: None,
            delimiter: '|',
            keywords_only: false,
            primary_row: 4,
            primary_cols: vec![0, 1],
            output: None,
            preview_json: false,
        }
    }

    /// One-sheet fixture workbook with the given single-column rows.
    fn fixture_workbook(rows: &[&str]) -> Vec<u8> {
        let table = ResultTable {
            sheet_name: "Feuille1".to_string(),
            headers: None,
            rows: rows
                .iter()
                .map(|value| vec![kwsum_engine::grid::CellValue::Text(value.to_string())])
                .collect(),
            file_name: "fixture.xlsx".to_string(),
        };
        xlsx::write_table(&table).unwrap()
    }

    #[test]
    fn test_sniff_format() {
        assert_eq!(sniff_format(Path::new("a.xlsx")), Some(InputFormat::Workbook));
        assert_eq!(sniff_format(Path::new("a.XLSX")), Some(InputFormat::Workbook));
        assert_eq!(sniff_format(Path::new("a.ods")), Some(InputFormat::Workbook));
        assert_eq!(sniff_format(Path::new("a.txt")), Some(InputFormat::Text));
        assert_eq!(sniff_format(Path::new("a.bin")), None);
        assert_eq!(sniff_format(Path::new("-")), None);
    }

    #[test]
    fn test_strategy_mapping() {
        assert_eq!(StrategyArg::Count.to_strategy(), Strategy::FrequencyCount);
        assert_eq!(StrategyArg::Sheets.to_strategy(), Strategy::UniqueListPerGroup);
        assert_eq!(StrategyArg::Primary.to_strategy(), Strategy::PrimaryKeywordPerGroup);
        assert_eq!(StrategyArg::Bare.to_strategy(), Strategy::UniqueListUnlabeled);
    }

    #[test]
    fn test_consolidate_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("listes.xlsx");
        fs::write(&input, fixture_workbook(&["a | b", "a"])).unwrap();

        let output = dir.path().join("out.xlsx");
        let mut args = default_args(input);
        args.output = Some(output.clone());

        assert_eq!(run_consolidate(&args).unwrap(), EXIT_SUCCESS);

        let grids = xlsx::read_workbook(&fs::read(&output).unwrap()).unwrap();
        let grid = &grids[0];
        assert_eq!(grid.name, "Occurrences");
        // "a" counted twice, ranked first under the header row
        assert_eq!(
            grid.get(1, 0),
            Some(&kwsum_engine::grid::CellValue::Text("a".into()))
        );
        assert_eq!(
            grid.get(1, 1),
            Some(&kwsum_engine::grid::CellValue::Number(2.0))
        );
    }

    #[test]
    fn test_no_tokens_exit_code_and_no_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("vide.xlsx");
        fs::write(&input, fixture_workbook(&[])).unwrap();

        let output = dir.path().join("out.xlsx");
        let mut args = default_args(input);
        args.output = Some(output.clone());

        assert_eq!(run_consolidate(&args).unwrap(), EXIT_NO_TOKENS);
        assert!(!output.exists());
    }

    #[test]
    fn test_unknown_extension_is_usage_error() {
        let args = default_args(PathBuf::from("mystery.bin"));
        assert_eq!(run_consolidate(&args).unwrap(), EXIT_USAGE);
    }

    #[test]
    fn test_text_input_rejects_per_sheet_strategies() {
        let mut args = default_args(PathBuf::from("mots.txt"));
        args.strategy = StrategyArg::Sheets;
        assert_eq!(run_consolidate(&args).unwrap(), EXIT_USAGE);
    }

    #[test]
    fn test_text_frequency_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("mots.txt");
        fs::write(&input, "x | y\nx\n").unwrap();

        let output = dir.path().join("out.xlsx");
        let mut args = default_args(input);
        args.output = Some(output.clone());

        assert_eq!(run_consolidate(&args).unwrap(), EXIT_SUCCESS);
        assert!(output.exists());
    }

    #[test]
    fn test_malformed_workbook_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("cassé.xlsx");
        fs::write(&input, b"not a zip archive").unwrap();

        let args = default_args(input);
        assert!(run_consolidate(&args).is_err());
    }
}
