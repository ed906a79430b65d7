//! Strongly-typed bindings for the deployed contracts.
//!
//! Only the entry points the bridge actually submits are bound; argument
//! arity and types are checked at compile time instead of at call time.

use alloy::sol;

sol! {
    /// Admin-mintable fiat token (one instance per currency).
    #[sol(rpc)]
    contract FiatToken {
        function mint(uint256 amount, address to) external;
        function burn(uint256 amount, address from) external;
        function approve(address spender, uint256 amount) external returns (bool);
    }

    /// Lending pool holding supplied fiat liquidity (one per token).
    #[sol(rpc)]
    contract LendingPool {
        function supply(uint256 amount, address behalfOf) external;
        function repay(uint256 amount, address behalfOf) external;
    }
}
