mod config;
mod contract;
mod error;
mod fonts;
pub mod layout;
mod model;
mod pdf;
pub mod surface;

pub use config::{ContractOptions, FontFiles, PageGeometry, Theme};
pub use contract::{
    LEGAL_TERMS, SIGNATURE_BLOCK_HEIGHT, assemble, final_price, format_money, generate_contract,
    party_rows, product_rows, terms_rows,
};
pub use error::Error;
pub use fonts::{FontFace, FontSet, FontStyle, TrueTypeFace};
pub use model::{CompanyProfile, ContractInput, LogoSource, Order, Party};
pub use surface::Document;

use std::path::Path;
use std::time::Instant;

/// Read a JSON record bundle (order, buyer, seller, company).
pub fn load_input(path: &Path) -> Result<ContractInput, Error> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

pub fn save(doc: &Document, path: &Path) -> Result<(), Error> {
    doc.save(path)
}

/// Generate the contract described by `input` and write it to `output`.
pub fn convert_input_to_pdf(
    input: &Path,
    output: &Path,
    options: &ContractOptions,
) -> Result<(), Error> {
    let t0 = Instant::now();

    let records = load_input(input)?;
    let t_load = t0.elapsed();

    let doc = generate_contract(
        records.order.as_ref(),
        records.buyer.as_ref(),
        records.seller.as_ref(),
        &records.company,
        options,
    )?;
    let t_layout = t0.elapsed();

    let bytes = doc.to_pdf()?;
    let t_render = t0.elapsed();

    std::fs::write(output, &bytes)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: load={:.1}ms, layout={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_load.as_secs_f64() * 1000.0,
        (t_layout - t_load).as_secs_f64() * 1000.0,
        (t_render - t_layout).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(())
}
