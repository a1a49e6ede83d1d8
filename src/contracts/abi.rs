//! Contract bindings.

use alloy::sol;

sol! {
    /// Canonical wrapped-ether contract.
    #[sol(rpc)]
    #[derive(Debug, PartialEq, Eq)]
    contract IWETH9 {
        event Deposit(address indexed dst, uint256 wad);
        event Withdrawal(address indexed src, uint256 wad);

        function deposit() external payable;
        function withdraw(uint256 wad) external;
    }
}

sol! {
    /// Subset of ERC-20 the wrapper needs.
    #[sol(rpc)]
    #[derive(Debug, PartialEq, Eq)]
    contract IERC20 {
        event Transfer(address indexed from, address indexed to, uint256 value);
        event Approval(address indexed owner, address indexed spender, uint256 value);

        function balanceOf(address owner) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 value) external returns (bool);
    }
}
