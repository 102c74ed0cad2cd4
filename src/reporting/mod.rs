pub mod assembler;

pub use assembler::{assemble_report, collect_report_input, write_report, ReportArtifact};
