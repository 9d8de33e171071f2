use std::path::PathBuf;

use pcrelift_compiler::optimize::{Accelerate, Optimizer};

use super::document::FlagOverrides;
use super::run_common::load_ir;

/// How far through the optimizer to run before printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lowered,
    Accelerated,
    Optimised,
}

impl Stage {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "lowered" => Some(Stage::Lowered),
            "accelerated" => Some(Stage::Accelerated),
            "optimised" => Some(Stage::Optimised),
            _ => None,
        }
    }

    fn optimizer(self) -> Optimizer {
        match self {
            Stage::Lowered => Optimizer::none(),
            Stage::Accelerated => Optimizer::new(vec![Box::new(Accelerate)]),
            Stage::Optimised => Optimizer::default(),
        }
    }
}

pub struct DumpArgs {
    pub document_path: Option<PathBuf>,
    pub document_text: Option<String>,
    pub stage: Stage,
    pub overrides: FlagOverrides,
}

pub fn run(args: DumpArgs) {
    let ir = load_ir(
        args.document_path.as_deref(),
        args.document_text.as_deref(),
        args.overrides,
    );

    match args.stage.optimizer().optimise(ir) {
        Ok(ir) => print!("{}", pcrelift_compiler::dump(ir.tree())),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
