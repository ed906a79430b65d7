pub mod banks;
pub mod mint;
pub mod repay;
pub mod status;
pub mod supply;

use agrolend_core::TransactionResult;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080";

/// Print a settlement/mint outcome the same way for every command.
pub fn print_result(result: &TransactionResult) {
    if result.success {
        println!("Confirmed.");
    } else {
        println!("Rejected.");
    }
    if let Some(tx_id) = &result.tx_id {
        println!("  Tx:       {tx_id}");
    }
    println!("  Message:  {}", result.message);
}
