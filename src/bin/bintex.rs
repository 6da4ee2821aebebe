//! BinTex transcoding utility
//! Transcodes token notation from a file, an inline expression or stdin and prints a hex dump

use bintex_rs::queue::hex_rows;
use bintex_rs::{BufferSource, CharSource, Endianness, Options, Stop, StreamSource, Transcoder};
use std::env;
use std::io::Read;
use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, EnvFilter};

enum Input {
    Expression(String),
    File(String),
    Stdin,
}

fn usage(program: &str) -> ! {
    eprintln!(
        "Usage: {} [--config <options.json>] [--byte-order big|little|native] (-e <expression> | <file> | -)",
        program
    );
    eprintln!("Example: {} -e '[00 11 22 33] (32 64 96 128) d-5930 \"Blah\"'", program);
    eprintln!("\nSet RUST_LOG=debug to dump the bytes of each token.");
    std::process::exit(1);
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    let format_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(format_layer)
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("bintex");

    let mut config = None;
    let mut byte_order = None;
    let mut input = None;
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--config" => match rest.next() {
                Some(path) => config = Some(path.clone()),
                None => usage(program),
            },
            "--byte-order" => match rest.next().map(String::as_str) {
                Some("big") => byte_order = Some(Endianness::Big),
                Some("little") => byte_order = Some(Endianness::Little),
                Some("native") => byte_order = Some(Endianness::native()),
                _ => usage(program),
            },
            "-e" => match rest.next() {
                Some(expr) => input = Some(Input::Expression(expr.clone())),
                None => usage(program),
            },
            "-h" | "--help" => usage(program),
            "-" => input = Some(Input::Stdin),
            path => input = Some(Input::File(path.to_string())),
        }
    }
    let input = input.unwrap_or_else(|| usage(program));

    let mut options = match &config {
        Some(path) => {
            tracing::info!("Loading options from {}", path);
            Options::load(path)?
        }
        None => Options::default(),
    };
    if let Some(order) = byte_order {
        options.byte_order = order;
    }
    tracing::debug!(
        "Byte order {}, capacity {} bytes",
        options.byte_order,
        options.capacity
    );

    let transcoder = Transcoder::new(options);
    let output = match input {
        Input::Expression(expr) => run(&transcoder, &mut BufferSource::from(expr.as_str()))?,
        Input::File(path) => {
            tracing::info!("Transcoding {}", path);
            run(&transcoder, &mut StreamSource::open(&path)?)?
        }
        Input::Stdin => {
            let mut text = Vec::new();
            std::io::stdin().read_to_end(&mut text)?;
            run(&transcoder, &mut BufferSource::new(&text))?
        }
    };

    println!("{} Bytes written to output", output.len());
    print!("{}", hex_rows(&output, 0));

    Ok(())
}

/// Transcode every line of `source`, continuing past `;` terminators
fn run<S: CharSource>(transcoder: &Transcoder, source: &mut S) -> anyhow::Result<Vec<u8>> {
    let mut output = vec![0u8; transcoder.options().capacity];
    let mut total = 0;

    loop {
        let outcome = transcoder.transcode_all(source, &mut output[total..]);
        total += outcome.written;

        match outcome.stop {
            Stop::LineEnd => tracing::debug!("Line end after {} bytes", total),
            Stop::EndOfInput => break,
            Stop::Failed(err) => {
                print!("{}", hex_rows(&output[..total], 0));
                anyhow::bail!("Transcoding failed after {} bytes: {}", total, err);
            }
        }
    }

    output.truncate(total);
    Ok(output)
}
