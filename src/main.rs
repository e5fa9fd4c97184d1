// This binary crate is intentionally minimal.
// All training logic lives in the library (src/lib.rs and its modules).
// Run demos with:
//   cargo run --example xor
//   cargo run --example sine
fn main() {
    println!("anvil-nn: a from-scratch neural network trainer in Rust.");
    println!("Run `cargo run --example xor` or `cargo run --example sine`.");
}
