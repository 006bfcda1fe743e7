use alloy_primitives::{Address, U256};
use criterion::{Criterion, criterion_group, criterion_main};
use lazy_static::lazy_static;
use rin_swap::{CallContext, Chain, ConstantProductAmm, InMemoryChain, Router, SepoliaAddress, SwapOrder};

lazy_static! {
    static ref TOKEN: Address = Address::repeat_byte(0xAA);
    static ref PAIR: Address = Address::repeat_byte(0xBB);
    static ref OWNER: Address = Address::repeat_byte(0x0F);
    static ref TRADER: Address = Address::repeat_byte(0x01);
}

const NOW: u64 = 1_700_000_000;

fn setup() -> eyre::Result<(Router<ConstantProductAmm>, InMemoryChain)> {
    let amm = ConstantProductAmm::new(SepoliaAddress::UNISWAP_V2_ROUTER, SepoliaAddress::WETH).with_pair(*TOKEN, *PAIR);
    let router = Router::new(amm, SepoliaAddress::RIN_SWAP, *OWNER, SepoliaAddress::WETH, U256::from(30))?;

    let mut chain = InMemoryChain::new();
    chain.mint_native(*PAIR, U256::from(10u128.pow(24)))?;
    chain.mint_token(*TOKEN, *PAIR, U256::from(10u128.pow(27)))?;
    chain.mint_native(*TRADER, U256::from(10u128.pow(24)))?;
    chain.mint_token(*TOKEN, *TRADER, U256::from(10u128.pow(27)))?;
    chain.approve(*TOKEN, *TRADER, SepoliaAddress::RIN_SWAP, U256::MAX);
    Ok((router, chain))
}

fn order(amount: u64) -> SwapOrder {
    SwapOrder::new(*TOKEN, U256::from(amount), U256::ZERO, U256::from(NOW + 600))
}

fn test_estimates() -> eyre::Result<()> {
    let (router, chain) = setup()?;
    for i in 1..1000u64 {
        router.estimate_buy(&chain, *TOKEN, U256::from(i * 1_000_000))?;
        router.estimate_sell(&chain, *TOKEN, U256::from(i * 1_000_000))?;
    }
    Ok(())
}

fn test_round_trips() -> eyre::Result<()> {
    let (mut router, mut chain) = setup()?;
    for i in 1..1000u64 {
        let amount = i * 1_000_000;
        let buy = CallContext::new(*TRADER, NOW).with_value(U256::from(amount));
        router.execute_buy_order(&mut chain, &buy, &order(amount))?;
        router.execute_sell_order(&mut chain, &CallContext::new(*TRADER, NOW), &order(amount))?;
    }
    router.withdraw_fees(&mut chain, &CallContext::new(*OWNER, NOW))?;
    Ok(())
}

fn test_batch_buy() -> eyre::Result<()> {
    let (mut router, mut chain) = setup()?;
    let orders: Vec<SwapOrder> = (1..100u64).map(|i| order(i * 1_000_000)).collect();
    let total = orders.iter().fold(U256::ZERO, |total, order| total + order.amount);
    router.execute_buy_orders(&mut chain, &CallContext::new(*TRADER, NOW).with_value(total), &orders)?;
    Ok(())
}

fn benchmark_router(c: &mut Criterion) {
    let mut group = c.benchmark_group("router");
    group.sample_size(10);

    group.bench_function("test_estimates", |b| b.iter(test_estimates));
    group.bench_function("test_round_trips", |b| b.iter(test_round_trips));
    group.bench_function("test_batch_buy", |b| b.iter(test_batch_buy));
    group.finish();
}

criterion_group!(benches, benchmark_router);
criterion_main!(benches);
