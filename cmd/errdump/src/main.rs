//! TideSync error dump example
//!
//! Builds the chained diagnostic error a sync operation would raise and
//! prints the full rendering, first without and then with stack capture.

use std::io;

use tserror::{include_stack_trace, set_include_stack_trace, ErrorCode, ErrorInfo, TsError};

fn main() {
    println!("=== TideSync Error Dump ===\n");

    let io_err = io::Error::new(io::ErrorKind::NotFound, "the file could not be opened");
    let fetch = TsError::from_cause(
        ErrorCode::FileManagerError,
        &io_err,
        "tidesync::vacuum::least_recent_sync_date",
    );
    println!("-- capture off (include_stack_trace = {})", include_stack_trace());
    println!("{fetch}\n");

    set_include_stack_trace(true);
    let info = ErrorInfo::new()
        .with("path", "/store/documents/42.sync")
        .with("attempts", 3);
    let upload = TsError::compose(
        ErrorCode::StoreSaveFailed,
        Some(&fetch),
        Some(info),
        Some("tidesync::upload::whole_store"),
    );
    println!("-- capture on (include_stack_trace = {})", include_stack_trace());
    println!("{upload}\n");

    match serde_json::to_string_pretty(&upload) {
        Ok(json) => println!("-- serialized\n{json}"),
        Err(err) => eprintln!("serialization failed: {err}"),
    }
}
