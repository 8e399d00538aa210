use std::path::PathBuf;
use std::process::ExitCode;

use careerdoc_pdf::{ConvertOptions, FontFiles, Paper, Template, convert_json};
use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TemplateArg {
    Classic,
    Modern,
    Minimal,
}

impl From<TemplateArg> for Template {
    fn from(t: TemplateArg) -> Self {
        match t {
            TemplateArg::Classic => Template::Classic,
            TemplateArg::Modern => Template::Modern,
            TemplateArg::Minimal => Template::Minimal,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PaperArg {
    Letter,
    A4,
}

#[derive(Parser, Debug)]
#[command(version, about = "Lay out generated resume, cover letter and interview answers as PDF")]
struct Args {
    /// JSON file with `resume`, `coverLetter` and/or `interviewAnswers`
    input: PathBuf,

    /// Directory the PDFs are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    #[arg(short, long, value_enum, default_value = "classic")]
    template: TemplateArg,

    #[arg(long, value_enum, default_value = "letter")]
    paper: PaperArg,

    /// JSON file overriding individual style fields of the template
    #[arg(long)]
    style: Option<PathBuf>,

    /// Also write a .txt export next to each PDF
    #[arg(long)]
    txt: bool,

    /// Date printed on a cover letter that has none (default: today)
    #[arg(long)]
    date: Option<String>,

    /// TrueType file for regular text [env: CAREERDOC_FONT]
    #[arg(long)]
    font: Option<PathBuf>,

    /// TrueType file for bold text [env: CAREERDOC_BOLD_FONT]
    #[arg(long)]
    bold_font: Option<PathBuf>,

    /// TrueType file for italic text [env: CAREERDOC_ITALIC_FONT]
    #[arg(long)]
    italic_font: Option<PathBuf>,

    /// TrueType file for bold italic text [env: CAREERDOC_BOLD_ITALIC_FONT]
    #[arg(long)]
    bold_italic_font: Option<PathBuf>,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(args: Args) -> Result<(), careerdoc_pdf::Error> {
    let mut style = Template::from(args.template).style();
    if let Some(path) = &args.style {
        style = style.with_overrides(&std::fs::read_to_string(path)?)?;
    }

    let env_fonts = FontFiles::from_env();
    let fonts = FontFiles {
        regular: args.font.or(env_fonts.regular),
        bold: args.bold_font.or(env_fonts.bold),
        italic: args.italic_font.or(env_fonts.italic),
        bold_italic: args.bold_italic_font.or(env_fonts.bold_italic),
    };

    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().format("%B %-d, %Y").to_string());

    let options = ConvertOptions {
        paper: match args.paper {
            PaperArg::Letter => Paper::Letter,
            PaperArg::A4 => Paper::A4,
        },
        style,
        fonts,
        write_text: args.txt,
        date: Some(date),
    };

    for path in convert_json(&args.input, &args.out_dir, &options)? {
        println!("{}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
