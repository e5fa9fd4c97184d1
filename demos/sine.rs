//! Regression demo: fits sin(x) + cos(x) on a fixed grid, using a
//! train/test split and z-score input scaling.

use anvil_nn::{Activation, LossKind, Matrix, Network, Result, ScalerKind, TrainOptions};

fn main() -> Result<()> {
    env_logger::init();

    let n = 80;
    let mut x = Matrix::<f64>::new(1, n)?;
    let mut y = Matrix::<f64>::new(1, n)?;
    for i in 0..n {
        let v = -3.0 + 6.0 * i as f64 / (n - 1) as f64;
        x.set(0, i, v)?;
        y.set(0, i, v.sin() + v.cos())?;
    }

    Network::<f64>::scale_feature_inplace(0, &mut x, ScalerKind::ZScore)?;
    let (x_train, y_train, x_test, y_test) = Network::<f64>::train_test_split(&x, &y, 0.8)?;

    let mut net = Network::<f64>::new(LossKind::Mse, 0.02, 8000, n, 1);
    net.add_dense_layer(1, 16, Activation::Tanh)?;
    net.add_dense_layer(16, 16, Activation::Tanh)?;
    net.add_dense_layer(16, 1, Activation::Linear)?;

    let train_loss = net.train(&x_train, &y_train, &TrainOptions::verbose(1000))?;
    println!("final training loss: {train_loss:.6}");

    let predictions = net.forward(&x_test)?;
    let test_loss = net.compute_loss(&y_test, &predictions)?;
    println!("held-out loss over {} samples: {test_loss:.6}", x_test.cols());

    Ok(())
}
