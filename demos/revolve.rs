//! Command-line walkthrough of the lathe pipeline.
//!
//! Usage:
//! ```text
//! cargo run --example revolve                                   # y = x^2, y = 4 about y = 0
//! cargo run --example revolve -- "y = sqrt(x)" "y = 0" --axis x=0
//! RUST_LOG=lathe=debug cargo run --example revolve              # show operation logs
//! ```
//!
//! `--axis y=K` revolves about the horizontal line `y = K` (disk method),
//! `--axis x=K` about the vertical line `x = K` (shell method).

use lathe::{Axis, Document, Result};

fn parse_axis(arg: &str) -> Option<(Axis, f64)> {
    let (variable, value) = arg.split_once('=')?;
    let value: f64 = value.trim().parse().ok()?;
    match variable.trim() {
        "y" | "Y" => Some((Axis::X, value)),
        "x" | "X" => Some((Axis::Y, value)),
        _ => None,
    }
}

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for lathe.
    // Override with RUST_LOG env var (e.g. RUST_LOG=lathe=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("lathe=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut equations = Vec::new();
    let mut axis = (Axis::X, 0.0);
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--axis" {
            match args.next().as_deref().and_then(parse_axis) {
                Some(parsed) => axis = parsed,
                None => eprintln!("ignoring malformed --axis, expected x=K or y=K"),
            }
        } else {
            equations.push(arg);
        }
    }
    if equations.is_empty() {
        equations = vec!["y = x^2".to_string(), "y = 4".to_string()];
    }

    let mut doc = Document::new();
    for equation in &equations {
        if doc.add_curve(equation).is_none() {
            eprintln!("skipping {equation:?}: expected y = f(x) or x = g(y)");
        }
    }

    let bounds = doc.auto_bounds();
    println!("bounds: [{}, {}]", bounds.x_min, bounds.x_max);

    let result = doc.revolve(bounds.x_min, bounds.x_max, axis.0, axis.1)?;
    println!("{}", result.formula);
    println!("LaTeX: {}", result.formula.to_latex());
    println!("area:   {:.6}", result.region.area());
    println!("volume: {:.6} ({} method)", result.volume, result.method);
    for span in &result.region.spans {
        println!(
            "  x in [{:.4}, {:.4}]: {} over {}",
            span.x_start, span.x_end, span.upper.expression, span.lower.expression
        );
    }

    let mesh = doc.mesh(&result)?;
    println!(
        "mesh: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    for diagnostic in doc.diagnostics().records() {
        println!("{diagnostic}");
    }
    Ok(())
}
