//! End-to-end binary classification on the XOR truth table.

use anvil_nn::{Activation, LossKind, Matrix, Network, TrainOptions};

fn xor_data() -> (Matrix<f64>, Matrix<f64>) {
    let x = Matrix::from_rows(vec![
        vec![0.0, 0.0, 1.0, 1.0],
        vec![0.0, 1.0, 0.0, 1.0],
    ])
    .unwrap();
    let y = Matrix::from_rows(vec![vec![0.0, 1.0, 1.0, 0.0]]).unwrap();
    (x, y)
}

#[test]
fn xor_training_converges_and_classifies_all_inputs() {
    let (x, y) = xor_data();

    let mut net = Network::<f64>::new(LossKind::Bce, 0.1, 20_000, 4, 42);
    net.add_dense_layer(2, 8, Activation::ReLU).unwrap();
    net.add_dense_layer(8, 1, Activation::Sigmoid).unwrap();

    let yhat0 = net.forward(&x).unwrap();
    let initial_loss = net.compute_loss(&y, &yhat0).unwrap();

    let final_loss = net.train(&x, &y, &TrainOptions::silent()).unwrap();

    assert!(
        final_loss < initial_loss,
        "loss did not decrease: {initial_loss} -> {final_loss}"
    );

    let predictions = net.forward(&x).unwrap();
    let expected = [0.0, 1.0, 1.0, 0.0];
    for (i, &target) in expected.iter().enumerate() {
        let p = predictions.at(0, i).unwrap();
        assert_eq!(
            p.round(),
            target,
            "sample {i}: predicted {p}, wanted {target}"
        );
    }
}

#[test]
fn xor_training_is_reproducible_for_a_fixed_seed() {
    let (x, y) = xor_data();

    let run = |seed: u64| {
        let mut net = Network::<f64>::new(LossKind::Bce, 0.1, 500, 4, seed);
        net.add_dense_layer(2, 8, Activation::ReLU).unwrap();
        net.add_dense_layer(8, 1, Activation::Sigmoid).unwrap();
        net.train(&x, &y, &TrainOptions::silent()).unwrap()
    };

    assert_eq!(run(7), run(7));
}
