use crate::bit_vector::*;
use crate::example_patterns::*;
use crate::syndrome_mapper::*;
use crate::util::*;
use crate::visualize::*;
use clap::builder::{StringValueParser, TypedValueParser, ValueParser};
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Parser, Subcommand};
use pbr::ProgressBar;
use rand::rngs::SmallRng;
use rand::RngCore;
use rand::{thread_rng, Rng, SeedableRng};
use std::collections::BTreeSet;
use std::env;
use std::time::Instant;

#[derive(Parser, Clone)]
#[clap(author = clap::crate_authors!(", "))]
#[clap(version = env!("CARGO_PKG_VERSION"))]
#[clap(about = "Greedy syndrome mapper and parity-check matrix builder for binary linear codes")]
#[clap(color = clap::ColorChoice::Auto)]
#[clap(propagate_version = true)]
#[clap(subcommand_required = true)]
#[clap(arg_required_else_help = true)]
pub struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// print the full syndrome mapping, one line per error pattern
    FullMapping(PatternSourceParameters),
    /// print the basis mapping, one line per dimension index
    BasisMapping(PatternSourceParameters),
    /// print the derived parity check matrix
    ParityCheckMatrix(PatternSourceParameters),
    /// print the full mapping, the basis mapping and the parity check matrix
    AllMapping(PatternSourceParameters),
    /// benchmark the speed of the greedy constructor
    Benchmark(BenchmarkParameters),
    /// built-in tests
    Test {
        #[clap(subcommand)]
        command: TestCommands,
    },
}

#[derive(Parser, Clone)]
pub struct PatternSourceParameters {
    /// error patterns as a JSON array of 0/1 arrays, e.g. [[1,0],[0,1]]
    #[clap(short = 'e', long, value_parser = ValueParser::new(SerdeJsonParser))]
    error_patterns: Option<serde_json::Value>,
    /// read error patterns from a file, one JSON array per line
    #[clap(short = 'f', long)]
    file: Option<String>,
    /// use the standard unit vectors of the given dimension
    #[clap(short = 's', long)]
    standard_basis: Option<usize>,
    /// print a machine-readable JSON document instead of plain text
    #[clap(long, action)]
    json: bool,
}

#[derive(Parser, Clone)]
pub struct BenchmarkParameters {
    /// vector length
    #[clap(value_parser)]
    n: usize,
    /// number of random span generators per round
    #[clap(value_parser)]
    generator_count: usize,
    /// the number of rounds to run
    #[clap(short = 'r', long, default_value_t = 1000)]
    total_rounds: usize,
    /// use deterministic seed for debugging purpose (round number is the seed)
    #[clap(long, action)]
    use_deterministic_seed: bool,
    /// apply a fixed seed for the whole benchmark
    #[clap(long)]
    apply_deterministic_seed: Option<u64>,
    /// message on the progress bar
    #[clap(long, default_value_t = format!(""))]
    pb_message: String,
}

#[derive(Subcommand, Clone, Debug)]
pub enum TestCommands {
    /// test common cases
    Common,
}

#[derive(Clone)]
struct SerdeJsonParser;
impl TypedValueParser for SerdeJsonParser {
    type Value = serde_json::Value;
    fn parse_ref(
        &self,
        cmd: &clap::Command,
        arg: Option<&clap::Arg>,
        value: &std::ffi::OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let inner = StringValueParser::new();
        let val = inner.parse_ref(cmd, arg, value)?;
        match serde_json::from_str::<serde_json::Value>(&val) {
            Ok(vector) => Ok(vector),
            Err(error) => {
                let mut err = clap::Error::new(ErrorKind::ValueValidation).with_cmd(cmd);
                if let Some(arg) = arg {
                    err.insert(ContextKind::InvalidArg, ContextValue::String(arg.to_string()));
                }
                err.insert(
                    ContextKind::InvalidValue,
                    ContextValue::String(format!("should be like [[1,0],[0,1]], parse error: {error}")),
                );
                Err(err)
            }
        }
    }
}

impl PatternSourceParameters {
    pub fn load_patterns(&self) -> Result<Vec<BitVector>, MapperError> {
        match (&self.error_patterns, &self.file, self.standard_basis) {
            (Some(value), None, None) => parse_patterns_json(value),
            (None, Some(path), None) => load_pattern_file(path),
            (None, None, Some(n)) => Ok(standard_basis_patterns(n)),
            _ => Err(MapperError::InvalidInput(
                "provide exactly one of --error-patterns, --file or --standard-basis".to_string(),
            )),
        }
    }

    pub fn build_mapper(&self) -> Result<SyndromeMapper, MapperError> {
        SyndromeMapper::new(self.load_patterns()?)
    }
}

fn print_full_mapping(mapper: &SyndromeMapper) {
    println!("Full syndrome mapping (vector -> syndrome):");
    for (pattern, syndrome) in mapper.syndrome_map() {
        println!("  {pattern} -> {syndrome}");
    }
}

fn print_basis_mapping(mapper: &SyndromeMapper) {
    println!("Basis mapping (basis -> syndrome):");
    for (basis, syndrome) in mapper.basis_map_list() {
        println!("  {basis} -> {syndrome}");
    }
}

fn print_parity_check_matrix(mapper: &SyndromeMapper) {
    println!("Parity check matrix:");
    mapper.parity_check_matrix().printstd();
}

fn full_mapping_json(mapper: &SyndromeMapper) -> serde_json::Value {
    json!(mapper.syndrome_map().iter().collect::<Vec<_>>())
}

fn basis_mapping_json(mapper: &SyndromeMapper) -> serde_json::Value {
    json!(mapper.basis_map_list())
}

fn parity_check_matrix_json(mapper: &SyndromeMapper) -> serde_json::Value {
    let matrix = mapper.parity_check_matrix();
    json!({
        "rows": matrix.rows(),
        "columns": matrix.columns(),
        "column_dimensions": matrix.column_dimensions(),
        "entries": matrix.entries(),
    })
}

/// re-verify injectivity and linearity on a constructed mapper
pub fn verify_mapper(mapper: &SyndromeMapper) {
    let syndromes: BTreeSet<&BitVector> = mapper.syndrome_map().values().collect();
    assert_eq!(syndromes.len(), mapper.syndrome_map().len(), "syndromes must be distinct");
    assert!(syndromes.iter().all(|syndrome| !syndrome.is_zero()), "syndromes must be non-zero");
    for (dimension_index, group) in mapper.partition().groups() {
        let basis = &mapper.partition().basis_vectors()[dimension_index];
        let basis_syndrome = mapper.syndrome_of(basis).expect("basis must be mapped");
        for member in group.iter().filter(|member| *member != basis) {
            let residual = member.xor(basis);
            let residual_syndrome = mapper.syndrome_of(&residual).expect("residual must be mapped");
            assert_eq!(
                mapper.syndrome_of(member).expect("member must be mapped"),
                &basis_syndrome.xor(residual_syndrome),
                "syndromes must respect the XOR structure"
            );
        }
    }
}

impl Cli {
    pub fn run(self) {
        if let Err(error) = self.execute() {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    }

    fn execute(self) -> Result<(), MapperError> {
        match self.command {
            Commands::FullMapping(parameters) => {
                let mapper = parameters.build_mapper()?;
                if parameters.json {
                    println!("{}", json!({ "n": mapper.length(), "syndrome_map": full_mapping_json(&mapper) }));
                } else {
                    print_full_mapping(&mapper);
                }
            }
            Commands::BasisMapping(parameters) => {
                let mapper = parameters.build_mapper()?;
                if parameters.json {
                    println!("{}", json!({ "n": mapper.length(), "basis_map": basis_mapping_json(&mapper) }));
                } else {
                    print_basis_mapping(&mapper);
                }
            }
            Commands::ParityCheckMatrix(parameters) => {
                let mapper = parameters.build_mapper()?;
                if parameters.json {
                    println!(
                        "{}",
                        json!({ "n": mapper.length(), "parity_check_matrix": parity_check_matrix_json(&mapper) })
                    );
                } else {
                    print_parity_check_matrix(&mapper);
                }
            }
            Commands::AllMapping(parameters) => {
                let mapper = parameters.build_mapper()?;
                if parameters.json {
                    println!(
                        "{}",
                        json!({
                            "n": mapper.length(),
                            "syndrome_map": full_mapping_json(&mapper),
                            "basis_map": basis_mapping_json(&mapper),
                            "parity_check_matrix": parity_check_matrix_json(&mapper),
                        })
                    );
                } else {
                    print_full_mapping(&mapper);
                    println!();
                    print_basis_mapping(&mapper);
                    println!();
                    print_parity_check_matrix(&mapper);
                }
            }
            Commands::Benchmark(BenchmarkParameters {
                n,
                generator_count,
                total_rounds,
                use_deterministic_seed,
                apply_deterministic_seed,
                pb_message,
            }) => {
                // whether to disable progress bar, useful when running jobs in background
                let disable_progress_bar = env::var("DISABLE_PROGRESS_BAR").is_ok();
                let mut pb = if !disable_progress_bar {
                    let mut pb = ProgressBar::on(std::io::stderr(), total_rounds as u64);
                    pb.message(format!("{pb_message} ").as_str());
                    Some(pb)
                } else {
                    if !pb_message.is_empty() {
                        print!("{pb_message} ");
                    }
                    None
                };
                let mut rng = SmallRng::seed_from_u64(match apply_deterministic_seed {
                    Some(seed) => seed,
                    None => thread_rng().gen(),
                });
                let mut sum_construction_time = 0.;
                let mut sum_mapped_patterns = 0;
                for round in 0..(total_rounds as u64) {
                    if let Some(pb) = pb.as_mut() {
                        pb.set(round);
                    }
                    let seed = if use_deterministic_seed { round } else { rng.next_u64() };
                    let patterns = random_span_patterns(n, generator_count, seed);
                    if patterns.is_empty() {
                        continue; // every generator degenerated to zero
                    }
                    let begin = Instant::now();
                    let mapper = SyndromeMapper::new(patterns)?;
                    sum_construction_time += begin.elapsed().as_secs_f64();
                    sum_mapped_patterns += mapper.syndrome_map().len();
                }
                if let Some(pb) = pb.as_mut() {
                    pb.finish();
                    println!();
                }
                println!(
                    "total construction time: {:.6}s, average per round: {:.9}s, average mapped patterns: {:.1}",
                    sum_construction_time,
                    sum_construction_time / total_rounds as f64,
                    sum_mapped_patterns as f64 / total_rounds as f64
                );
            }
            Commands::Test { command } => match command {
                TestCommands::Common => {
                    for n in 1..=8 {
                        let mapper = SyndromeMapper::new(standard_basis_patterns(n))?;
                        verify_mapper(&mapper);
                        println!("[ok] standard basis n={n}");
                    }
                    for n in 1..=6 {
                        let mapper = SyndromeMapper::new(all_nonzero_patterns(n))?;
                        verify_mapper(&mapper);
                        println!("[ok] all non-zero patterns n={n}");
                    }
                    for seed in 0..10 {
                        let patterns = random_span_patterns(10, 5, seed);
                        if patterns.is_empty() {
                            continue;
                        }
                        let mapper = SyndromeMapper::new(patterns)?;
                        verify_mapper(&mapper);
                        println!("[ok] random span seed={seed}");
                    }
                }
            },
        }
        Ok(())
    }
}
