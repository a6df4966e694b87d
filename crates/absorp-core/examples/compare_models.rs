//! Compare every propagation model on one glass-wool panel.
//!
//! Run with:
//!   cargo run -p absorp-core --example compare_models
//!
//! Set `RUST_LOG=debug` to see the pipeline logs.

use absorp_core::{
    compare_models, FrequencyRange, MaterialParameters, Model, PoreShape, Setup, Termination,
};

fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Absorption Model Comparison ===");

    // 1. A 50 mm glass-wool panel with a 30 mm air gap.
    let material = MaterialParameters::new()
        .with_flow_resistivity(15_000.0)
        .with_porosity(0.97)
        .with_tortuosity(1.05)
        .with_viscous_length(90e-6)
        .with_thermal_length(180e-6)
        .with_thermal_permeability(0.97 * 180e-6 * 180e-6 / 8.0)
        .with_pore_shape(PoreShape::Circle);
    let termination = Termination::AirBacked {
        thickness: 0.05,
        air_gap: 0.03,
    };
    let setup = Setup::new(material, Model::default(), termination);
    println!("Material: {:?}", setup.material);
    println!("Termination: {:?}", setup.termination);

    // 2. Third-octave centre frequencies, 100 Hz to 5 kHz.
    let frequencies = match FrequencyRange::logarithmic(100.0, 5000.0, 18) {
        Ok(range) => range,
        Err(err) => {
            eprintln!("Bad frequency range: {err}");
            return;
        }
    };

    // 3. Evaluate all models in parallel.
    let comparison = match compare_models(&setup, &Model::ALL, &frequencies) {
        Ok(comparison) => comparison,
        Err(err) => {
            eprintln!("Bad ambient conditions: {err}");
            return;
        }
    };

    print!("{:>10}", "f [Hz]");
    for (model, _) in &comparison {
        print!("{:>34}", model.name());
    }
    println!();

    for (i, freq) in frequencies.iter().enumerate() {
        print!("{freq:>10.1}");
        for (_, result) in &comparison {
            match result {
                Ok(result) => print!("{:>34.3}", result.absorption[i]),
                Err(_) => print!("{:>34}", "-"),
            }
        }
        println!();
    }

    // 4. Summaries and anything that went wrong.
    println!();
    for (model, result) in &comparison {
        match result {
            Ok(result) => {
                let (peak_freq, peak_alpha) = result.peak().unwrap_or((f64::NAN, f64::NAN));
                println!(
                    "{model}: mean α = {:.3}, peak α = {peak_alpha:.3} at {peak_freq:.0} Hz, {} warning(s)",
                    result.mean_absorption(),
                    result.warnings.len()
                );
            }
            Err(err) => println!("{model}: {err}"),
        }
    }

    println!("=== Done ===");
}
