//! Trains a tiny classifier on the XOR truth table with binary
//! cross-entropy and the fused Sigmoid output gradient.

use anvil_nn::{Activation, LossKind, Matrix, Network, Result, TrainOptions};

fn main() -> Result<()> {
    env_logger::init();

    // Feature-major: one column per sample.
    let x = Matrix::from_rows(vec![
        vec![0.0, 0.0, 1.0, 1.0],
        vec![0.0, 1.0, 0.0, 1.0],
    ])?;
    let y = Matrix::from_rows(vec![vec![0.0, 1.0, 1.0, 0.0]])?;

    let mut net = Network::<f64>::new(LossKind::Bce, 0.1, 5000, 4, 42);
    net.add_dense_layer(2, 8, Activation::ReLU)?;
    net.add_dense_layer(8, 1, Activation::Sigmoid)?;

    let final_loss = net.train(&x, &y, &TrainOptions::verbose(500))?;
    println!("final loss: {final_loss:.6}");

    let predictions = net.forward(&x)?;
    println!("{predictions}");
    for i in 0..4 {
        let p = predictions.at(0, i)?;
        println!(
            "({}, {}) -> {:.4} (rounds to {})",
            x.at(0, i)?,
            x.at(1, i)?,
            p,
            p.round()
        );
    }

    Ok(())
}
