use coded_targets::pipeline;
use coded_targets::print::{SheetFormat, SheetLayout};
use coded_targets::RingCodeParams;

#[cfg(feature = "tracing")]
use coded_targets::core::init_tracing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    init_tracing(false, log::LevelFilter::Info);

    let Some(out_dir) = std::env::args().nth(1) else {
        eprintln!("Usage: generate_codes <out_dir> [ring_length]");
        return Ok(());
    };
    let ring_length = match std::env::args().nth(2) {
        Some(n) => n.parse()?,
        None => 14,
    };

    let params = RingCodeParams::with_ring_length(ring_length);
    let catalog = pipeline::generate(&params)?;
    println!("generated {} codes", catalog.len());

    let sheets = pipeline::write_catalog_sheets(
        &catalog,
        &SheetLayout::default(),
        &out_dir,
        SheetFormat::Svg,
    )?;
    println!("wrote {} sheets to {out_dir}", sheets.len());

    Ok(())
}
