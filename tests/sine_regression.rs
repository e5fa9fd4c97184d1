//! End-to-end regression on sin(x) + cos(x) over a fixed grid.

use anvil_nn::{Activation, LossKind, Matrix, Network, TrainOptions};

#[test]
fn sine_regression_reduces_loss_by_an_order_of_magnitude() {
    let n = 64;
    let mut x = Matrix::<f64>::new(1, n).unwrap();
    let mut y = Matrix::<f64>::new(1, n).unwrap();
    for i in 0..n {
        let v = -3.0 + 6.0 * i as f64 / (n - 1) as f64;
        x.set(0, i, v).unwrap();
        y.set(0, i, v.sin() + v.cos()).unwrap();
    }

    let mut net = Network::<f64>::new(LossKind::Mse, 0.02, 8000, n, 1);
    net.add_dense_layer(1, 16, Activation::Tanh).unwrap();
    net.add_dense_layer(16, 16, Activation::Tanh).unwrap();
    net.add_dense_layer(16, 1, Activation::Linear).unwrap();

    let yhat0 = net.forward(&x).unwrap();
    let initial_loss = net.compute_loss(&y, &yhat0).unwrap();

    let final_loss = net.train(&x, &y, &TrainOptions::silent()).unwrap();

    assert!(final_loss.is_finite());
    assert!(
        final_loss < initial_loss / 10.0,
        "expected >10x reduction, got {initial_loss} -> {final_loss}"
    );
}

#[test]
fn training_exports_a_loss_history() {
    let x = Matrix::from_rows(vec![vec![0.0, 0.5, 1.0, 1.5]]).unwrap();
    let y = Matrix::from_rows(vec![vec![0.0, 1.0, 2.0, 3.0]]).unwrap();

    let mut net = Network::<f64>::new(LossKind::Mse, 0.05, 50, 4, 3);
    net.add_dense_layer(1, 4, Activation::Tanh).unwrap();
    net.add_dense_layer(4, 1, Activation::Linear).unwrap();

    let dir = std::env::temp_dir().join("anvil_nn_loss_export_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("loss.json");

    let options = TrainOptions {
        export_loss: true,
        export_every: 10,
        export_path: Some(path.clone()),
        ..TrainOptions::default()
    };
    net.train(&x, &y, &options).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let history: Vec<anvil_nn::EpochStats> = serde_json::from_str(&text).unwrap();
    assert_eq!(history.len(), 5);
    assert_eq!(history[0].epoch, 0);
    assert_eq!(history.last().unwrap().epoch, 40);
    // The curve is recorded in training order and ends lower than it began.
    assert!(history.last().unwrap().loss <= history[0].loss);

    std::fs::remove_dir_all(&dir).ok();
}
