//! Post-burn immutability: after `burn_admin_keys`, no sequence of
//! admin-gated calls may mutate admin state, while user-initiated ledger
//! traffic keeps flowing.

mod common;

use common::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use qoracle::{Address, LifecycleError};

/// One admin-gated call against the system, by index. Every arm must
/// reject with `Immutable` once the keys are burned.
fn admin_call(t: &TestSystem, which: usize, sender: &Address) -> Option<LifecycleError> {
    let lifecycle = |e| match e {
        qoracle::OracleError::Lifecycle(l) => Some(l),
        _ => None,
    };
    match which {
        0 => t.system.committee().emergency_pause(sender).err().and_then(lifecycle),
        1 => t.system.committee().resume(sender).err().and_then(lifecycle),
        2 => t.system.committee().deactivate_oracle(sender, 1).err().and_then(lifecycle),
        3 => t.system.committee().activate_oracle(sender, 1).err().and_then(lifecycle),
        4 => t.system.committee().burn_key(sender).err(),
        5 => t.system.committee().finalize_launch(sender).err(),
        6 => t
            .system
            .bkpy()
            .mint_initial_supply(sender)
            .err()
            .and_then(|e| match e {
                qoracle::LedgerError::Lifecycle(l) => Some(l),
                _ => None,
            }),
        7 => t.system.bkpy().burn_key(sender).err(),
        8 => t.system.qbtc().burn_key(sender).err(),
        9 => t.system.qusd().burn_key(sender).err(),
        10 => t.system.bridge().burn_key(sender).err(),
        _ => t.system.governance().burn_key(sender).err(),
    }
}

#[test]
fn test_random_admin_sequences_cannot_mutate_after_burn() {
    let t = deployed_system(3, 2);
    t.system.bkpy().transfer(&admin(), &user(), 100_000).unwrap();
    t.system.burn_admin_keys(&admin()).unwrap();

    let baseline = serde_json::to_string(&t.system.status()).unwrap();
    let senders = [
        admin(),
        user(),
        Address::burned_sentinel(),
        Address::from("ST9RANDOM"),
    ];

    let mut rng = StdRng::seed_from_u64(0x0badcafe);
    for _ in 0..500 {
        let which = rng.gen_range(0..12);
        let sender = &senders[rng.gen_range(0..senders.len())];
        let err = admin_call(&t, which, sender);
        assert_eq!(err, Some(LifecycleError::Immutable));
    }

    // admin-observable state is bit-identical to the post-burn baseline
    assert_eq!(serde_json::to_string(&t.system.status()).unwrap(), baseline);
}

#[test]
fn test_user_traffic_flows_through_burned_system() {
    let t = deployed_system(3, 2);
    t.system.bkpy().transfer(&admin(), &user(), 100_000).unwrap();
    t.system.burn_admin_keys(&admin()).unwrap();

    // transfers, burns, oracle submissions, bridge swaps all still work
    t.system.bkpy().transfer(&user(), &admin(), 5_000).unwrap();
    t.system.bkpy().burn(&user(), 1_000).unwrap();

    let first = t.signed_update(price_message(UNIT_PRICE, NOW, 1), &[0, 1, 2, 3], &[]);
    t.system.committee().submit_price_update(&first).unwrap();

    let fresh = t.signed_update(price_message(UNIT_PRICE, NOW + 1, 2), &[0, 1, 2, 3], &[]);
    let out = t.system.bridge().swap_stx_for_qbtc(&user(), 2_000, &fresh).unwrap();
    assert_eq!(out, 2_000);

    t.system.qusd().mint(&bridge_authority(), &user(), 500).unwrap();
    assert_eq!(t.system.qusd().balance_of(&user()), 500);
}
