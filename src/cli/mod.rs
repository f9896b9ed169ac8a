//! CLI module for the corrective RAG engine
//!
//! Provides subcommands for running the engine in different modes:
//! - `serve`: HTTP server exposing the question-answering endpoint
//! - `ask`: answer a single question from the command line

pub mod ask;
pub mod serve;

use clap::{Parser, Subcommand};

/// Corrective RAG engine - retrieval-judged question answering
#[derive(Parser)]
#[command(name = "crag-engine")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Answer a single question and exit
    Ask(ask::AskArgs),
}
