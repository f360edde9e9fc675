//! Example generator run over a small order-entry schema.
//!
//! Run with: `cargo run --example generate_orders -- <output dir>`
//!
//! Set `RUST_LOG=debug` to see every construct as it is generated.

use anyhow::Context;
use flatsbe::prelude::*;
use std::path::PathBuf;

fn order_schema() -> IntermediateRepresentation {
    let mut ir = IntermediateRepresentation::new(
        "orders",
        vec![
            Token::new(Signal::BeginComposite, "messageHeader"),
            Token::encoding("blockLength", PrimitiveType::Uint16, 0),
            Token::encoding("templateId", PrimitiveType::Uint16, 2),
            Token::encoding("schemaId", PrimitiveType::Uint16, 4),
            Token::encoding("version", PrimitiveType::Uint16, 6),
            Token::new(Signal::EndComposite, "messageHeader"),
        ],
    );

    ir.add_type(vec![
        Token::new(Signal::BeginEnum, "Side").with_primitive_type(PrimitiveType::Uint8),
        Token::valid_value("Buy", 1u8),
        Token::valid_value("Sell", 2u8),
        Token::new(Signal::EndEnum, "Side"),
    ]);
    ir.add_type(vec![
        Token::new(Signal::BeginEnum, "OrdType").with_primitive_type(PrimitiveType::Char),
        Token::char_value("Market", b'1'),
        Token::char_value("Limit", b'2'),
        Token::new(Signal::EndEnum, "OrdType"),
    ]);
    ir.add_type(vec![
        Token::new(Signal::BeginSet, "ExecInst").with_primitive_type(PrimitiveType::Uint16),
        Token::choice("postOnly", 0),
        Token::choice("reduceOnly", 1),
        Token::choice("iceberg", 9),
        Token::new(Signal::EndSet, "ExecInst"),
    ]);
    ir.add_type(vec![
        Token::new(Signal::BeginComposite, "Decimal64"),
        Token::encoding("mantissa", PrimitiveType::Int64, 0),
        Token::encoding("exponent", PrimitiveType::Int8, 8),
        Token::new(Signal::EndComposite, "Decimal64"),
    ]);
    ir.add_type(vec![
        Token::new(Signal::BeginComposite, "OrderEntry"),
        Token::encoding("clOrdId", PrimitiveType::Uint64, 0),
        Token::new(Signal::BeginEnum, "side")
            .with_type_name("Side")
            .with_primitive_type(PrimitiveType::Uint8)
            .with_offset(8),
        Token::valid_value("Buy", 1u8),
        Token::valid_value("Sell", 2u8),
        Token::new(Signal::EndEnum, "side"),
        Token::new(Signal::BeginEnum, "ordType")
            .with_type_name("OrdType")
            .with_primitive_type(PrimitiveType::Char)
            .with_offset(9),
        Token::char_value("Market", b'1'),
        Token::char_value("Limit", b'2'),
        Token::new(Signal::EndEnum, "ordType"),
        Token::new(Signal::BeginComposite, "price")
            .with_type_name("Decimal64")
            .with_offset(10),
        Token::encoding("mantissa", PrimitiveType::Int64, 0),
        Token::encoding("exponent", PrimitiveType::Int8, 8),
        Token::new(Signal::EndComposite, "price"),
        Token::new(Signal::BeginSet, "execInst")
            .with_type_name("ExecInst")
            .with_primitive_type(PrimitiveType::Uint16)
            .with_offset(19),
        Token::choice("postOnly", 0),
        Token::choice("reduceOnly", 1),
        Token::choice("iceberg", 9),
        Token::new(Signal::EndSet, "execInst"),
        Token::new(Signal::EndComposite, "OrderEntry"),
    ]);
    ir
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let dir = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("target/flatsbe-orders"), PathBuf::from);

    let ir = order_schema();
    let output = DirectoryOutputManager::new(&dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;
    let mut generator = Generator::new(&ir, output)
        .with_options(GeneratorOptions::new().runtime_crate("::flatsbe::core"));

    let names = generator.generate().context("generating the orders schema")?;
    let output = generator.into_output();

    println!("Generated {} unit(s) into {}", names.len(), dir.display());
    for name in &names {
        println!("  {} -> {}", name, output.path_for(name).display());
    }

    Ok(())
}
