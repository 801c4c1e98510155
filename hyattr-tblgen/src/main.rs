use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use hyattr::{AttrEmitter, EmitOptions, PropertyStyle, manifest::registry_from_path};
use log::{LevelFilter, debug};

use crate::{
    config::TblgenConfig,
    error::{TblgenError, TblgenResult},
    output::{Published, WriteMode, publish, write_depfile},
};

mod config;
mod error;
mod output;

/// Generate attribute tables from an attribute manifest
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub action: Action,
}

#[derive(Subcommand)]
pub enum Action {
    /// Generate attributes
    GenAttrs(GenAttrsArgs),

    /// Print all records of the manifest
    PrintRecords {
        /// Attribute manifest
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Args, Default)]
pub struct GenAttrsArgs {
    /// Attribute manifest
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (stdout if absent)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Rendering of the property table entries
    #[arg(long, value_enum)]
    pub property_style: Option<StyleArg>,

    /// Do not emit the "do not edit" banner
    #[arg(long, default_value_t = false)]
    pub no_header: bool,

    /// Only touch the output file if its content changes
    #[arg(long, default_value_t = false)]
    pub write_if_changed: bool,

    /// Fail if the output file is out of date instead of writing it
    #[arg(long, default_value_t = false, conflicts_with = "write_if_changed")]
    pub check: bool,

    /// Write a make-style dependency file
    #[arg(short, long)]
    pub depfile: Option<PathBuf>,

    /// Configuration file providing defaults for the flags above
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StyleArg {
    Numeric,
    Symbolic,
}

impl From<StyleArg> for PropertyStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Numeric => PropertyStyle::Numeric,
            StyleArg::Symbolic => PropertyStyle::Symbolic,
        }
    }
}

/// Fully resolved `gen-attrs` settings.
#[derive(Debug, Clone, PartialEq, Eq)]
struct GenSettings {
    input: PathBuf,
    output: Option<PathBuf>,
    depfile: Option<PathBuf>,
    mode: WriteMode,
    emit: EmitOptions,
}

impl GenSettings {
    /// Merge the command line over the configuration file.
    fn resolve(args: GenAttrsArgs, config: TblgenConfig) -> TblgenResult<Self> {
        let input = args.input.or(config.input).ok_or(TblgenError::MissingInput)?;
        let output = args.output.or(config.output);
        let depfile = args.depfile.or(config.depfile);
        if depfile.is_some() && output.is_none() {
            return Err(TblgenError::DepfileWithoutOutput);
        }
        if args.check && output.is_none() {
            return Err(TblgenError::CheckWithoutOutput);
        }

        let mode = if args.check {
            WriteMode::Check
        } else if args.write_if_changed || config.write_if_changed {
            WriteMode::IfChanged
        } else {
            WriteMode::Always
        };

        let mut emit = config.emit;
        if let Some(style) = args.property_style {
            emit.property_style = style.into();
        }
        if args.no_header {
            emit.header = false;
        }
        if emit.source_name.is_none() {
            emit.source_name = input.file_name().map(|name| name.to_string_lossy().into_owned());
        }

        Ok(GenSettings {
            input,
            output,
            depfile,
            mode,
            emit,
        })
    }
}

fn gen_attrs(settings: GenSettings) -> TblgenResult<Published> {
    let registry = registry_from_path(&settings.input)?;
    let text = AttrEmitter::new(&registry, settings.emit).run()?;

    let published = publish(settings.output.as_deref(), &text, settings.mode)?;
    if let (Some(depfile), Some(output)) = (&settings.depfile, &settings.output) {
        if settings.mode != WriteMode::Check {
            write_depfile(depfile, output, &[settings.input.as_path()])?;
        }
    }
    Ok(published)
}

fn print_records(input: &Path) -> TblgenResult<()> {
    let registry = registry_from_path(input)?;
    print!("{}", registry.fmt());
    Ok(())
}

fn run(cli: Cli) -> TblgenResult<()> {
    match cli.action {
        Action::GenAttrs(args) => {
            let config = match &args.config {
                Some(path) => TblgenConfig::load(path)?,
                None => TblgenConfig::default(),
            };
            let settings = GenSettings::resolve(args, config)?;
            debug!("Resolved settings: {:?}", settings);
            gen_attrs(settings)?;
        }
        Action::PrintRecords { input } => print_records(&input)?,
    }
    Ok(())
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(error) = run(cli) {
        eprintln!("Error: {}", error);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
[[attr]]
name = "NoReturn"
kind = "EnumAttr"
display_string = "noreturn"
properties = ["FnAttr"]
"#;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn command_line_overrides_configuration() {
        let config = TblgenConfig::from_str(
            "cfg.toml",
            "input = \"cfg.toml.in\"\noutput = \"cfg.inc\"\n[emit]\nproperty_style = \"symbolic\"\n",
        )
        .unwrap();
        let args = GenAttrsArgs {
            input: Some(PathBuf::from("cli.toml")),
            property_style: Some(StyleArg::Numeric),
            no_header: true,
            ..GenAttrsArgs::default()
        };

        let settings = GenSettings::resolve(args, config).unwrap();
        assert_eq!(settings.input, PathBuf::from("cli.toml"));
        assert_eq!(settings.output, Some(PathBuf::from("cfg.inc")));
        assert_eq!(settings.emit.property_style, PropertyStyle::Numeric);
        assert!(!settings.emit.header);
        assert_eq!(settings.emit.source_name.as_deref(), Some("cli.toml"));
        assert_eq!(settings.mode, WriteMode::Always);
    }

    #[test]
    fn input_is_required() {
        let error = GenSettings::resolve(GenAttrsArgs::default(), TblgenConfig::default())
            .unwrap_err();
        assert!(matches!(error, TblgenError::MissingInput), "{error}");
    }

    #[test]
    fn depfile_requires_an_output() {
        let args = GenAttrsArgs {
            input: Some(PathBuf::from("defs.toml")),
            depfile: Some(PathBuf::from("defs.d")),
            ..GenAttrsArgs::default()
        };
        let error = GenSettings::resolve(args, TblgenConfig::default()).unwrap_err();
        assert!(matches!(error, TblgenError::DepfileWithoutOutput), "{error}");
    }

    #[test]
    fn check_requires_an_output() {
        let args = GenAttrsArgs {
            input: Some(PathBuf::from("defs.toml")),
            check: true,
            ..GenAttrsArgs::default()
        };
        let error = GenSettings::resolve(args, TblgenConfig::default()).unwrap_err();
        assert!(matches!(error, TblgenError::CheckWithoutOutput), "{error}");
    }

    #[test]
    fn gen_attrs_writes_output_and_depfile() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Attributes.toml");
        let output = dir.path().join("Attributes.inc");
        let depfile = dir.path().join("Attributes.d");
        std::fs::write(&input, MANIFEST).unwrap();

        let args = GenAttrsArgs {
            input: Some(input.clone()),
            output: Some(output.clone()),
            depfile: Some(depfile.clone()),
            write_if_changed: true,
            ..GenAttrsArgs::default()
        };
        let settings = GenSettings::resolve(args, TblgenConfig::default()).unwrap();

        assert_eq!(gen_attrs(settings.clone()).unwrap(), Published::Written);
        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.contains("From: Attributes.toml"));
        assert!(text.contains("NoReturn = 1,"));
        assert!(text.contains("AttrPropTable[] = {\n1,\n};\n"));

        let rule = std::fs::read_to_string(&depfile).unwrap();
        assert!(rule.ends_with("Attributes.toml\n"), "{rule}");

        assert_eq!(gen_attrs(settings).unwrap(), Published::Unchanged);
    }

    #[test]
    fn invalid_manifest_leaves_existing_output_alone() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Attributes.toml");
        let output = dir.path().join("Attributes.inc");
        std::fs::write(
            &input,
            "[[attr]]\nname = \"NoReturn\"\nkind = \"IntAttr\"\ndisplay_string = \"noreturn\"\nproperties = [\"IntersectAnd\"]\n",
        )
        .unwrap();
        std::fs::write(&output, "previous\n").unwrap();

        let args = GenAttrsArgs {
            input: Some(input),
            output: Some(output.clone()),
            ..GenAttrsArgs::default()
        };
        let settings = GenSettings::resolve(args, TblgenConfig::default()).unwrap();
        let error = gen_attrs(settings).unwrap_err();
        assert!(
            matches!(&error, TblgenError::Attr(e) if e.is_incompatible_property()),
            "{error}"
        );
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous\n");
    }
}
