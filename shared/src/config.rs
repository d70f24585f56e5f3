use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::error::LifeError;

/// File the sequential variant writes its final generation to.
pub const SEQUENTIAL_OUTPUT: &str = "final_generation.txt";

/// `prog <size> <maxGenerations>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequentialConfig {
    pub size: usize,
    pub max_generations: usize,
    pub output: PathBuf,
}

/// `prog <size> <maxGenerations> <numThreads> <outputPathStem>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelConfig {
    pub size: usize,
    pub max_generations: usize,
    pub threads: NonZeroUsize,
    pub output: PathBuf,
}

impl SequentialConfig {
    /// Parse the full argument list, program name included.
    pub fn from_args(args: &[String]) -> Result<Self, LifeError> {
        let [_, size, max_generations] = args else {
            return Err(usage(args, "<size of board> <max generations>"));
        };
        Ok(SequentialConfig {
            size: positive("size", size)?.get(),
            max_generations: positive("max generations", max_generations)?.get(),
            output: PathBuf::from(SEQUENTIAL_OUTPUT),
        })
    }
}

impl ParallelConfig {
    /// Parse the full argument list, program name included.
    pub fn from_args(args: &[String]) -> Result<Self, LifeError> {
        let [_, size, max_generations, threads, stem] = args else {
            return Err(usage(args, "<problem size> <max iterations> <num threads> <output path>"));
        };
        Ok(ParallelConfig {
            size: positive("problem size", size)?.get(),
            max_generations: positive("max iterations", max_generations)?.get(),
            threads: positive("num threads", threads)?,
            output: PathBuf::from(format!("{stem}.txt")),
        })
    }
}

fn usage(args: &[String], operands: &str) -> LifeError {
    let program = args.first().map_or("life", String::as_str);
    LifeError::Usage {
        usage: format!("{program} {operands}"),
    }
}

fn positive(name: &'static str, value: &str) -> Result<NonZeroUsize, LifeError> {
    value.trim().parse().map_err(|_| LifeError::Validation {
        name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn sequential_arguments() {
        let config = SequentialConfig::from_args(&args(&["life-seq", "100", "1000"])).unwrap();
        assert_eq!(config.size, 100);
        assert_eq!(config.max_generations, 1000);
        assert_eq!(config.output, PathBuf::from("final_generation.txt"));
    }

    #[test]
    fn parallel_arguments() {
        let config =
            ParallelConfig::from_args(&args(&["life-par", "100", "1000", "4", "./output"])).unwrap();
        assert_eq!(config.size, 100);
        assert_eq!(config.max_generations, 1000);
        assert_eq!(config.threads.get(), 4);
        assert_eq!(config.output, PathBuf::from("./output.txt"));
    }

    #[test]
    fn wrong_argument_count_is_a_usage_error() {
        let err = SequentialConfig::from_args(&args(&["life-seq", "10"])).unwrap_err();
        assert!(matches!(err, LifeError::Usage { ref usage } if usage.starts_with("life-seq ")));

        let err = ParallelConfig::from_args(&args(&["life-par", "10", "10", "2"])).unwrap_err();
        assert!(matches!(err, LifeError::Usage { .. }));

        assert!(matches!(SequentialConfig::from_args(&[]), Err(LifeError::Usage { .. })));
    }

    #[test]
    fn non_positive_values_are_rejected_by_both_variants() {
        for bad in ["0", "-3", "ten", ""] {
            let err = SequentialConfig::from_args(&args(&["life-seq", bad, "10"])).unwrap_err();
            assert!(matches!(err, LifeError::Validation { name: "size", .. }), "size `{bad}`");

            let err = SequentialConfig::from_args(&args(&["life-seq", "10", bad])).unwrap_err();
            assert!(matches!(err, LifeError::Validation { .. }), "generations `{bad}`");

            let err = ParallelConfig::from_args(&args(&["life-par", "10", "10", bad, "out"])).unwrap_err();
            assert!(matches!(err, LifeError::Validation { name: "num threads", .. }), "threads `{bad}`");
        }
    }
}
