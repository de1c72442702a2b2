use crate::{
    Ciphertext, EngineParameters,
    tests::{DECRYPT_SLACK, new_engine},
};
use blindfx_backend::FixedToken;
use blindfx_sampling::source::Source;

/// A ciphertext together with the plaintext it should carry and a bound on
/// the accumulated error.
#[derive(Clone)]
struct Tracked {
    ct: Ciphertext,
    want: f64,
    err: f64,
}

#[test]
fn fresh_ciphertexts_are_canonical() {
    let (engine, mut source) = new_engine(EngineParameters::default(), 20);
    (-20..20).for_each(|i| {
        let m: f64 = i as f64 * 1.37;
        let ct: Ciphertext = engine.encrypt(m, &mut source).unwrap();
        assert!(engine.is_canonical(&ct).unwrap());
        let base: i64 = engine.recover_base(&ct).unwrap().to_i64().unwrap();
        let scaled: i64 = (m * 100_000.0).round() as i64;
        assert!((base - scaled).abs() <= 11, "base={} scaled={}", base, scaled);
    });
}

#[test]
fn random_tokens_are_not_canonical() {
    let (engine, mut source) = new_engine(EngineParameters::default(), 21);
    let non_canonical: usize = (0..64)
        .filter(|_| {
            let bytes: Vec<u8> = source.next_bits(256);
            let ct: Ciphertext = Ciphertext::from_token(FixedToken::from_bytes(bytes));
            !engine.is_canonical(&ct).unwrap()
        })
        .count();
    assert_eq!(non_canonical, 64);
}

#[test]
fn operator_compositions_stay_canonical() {
    let params: EngineParameters = EngineParameters::default();
    let (engine, mut source) = new_engine(params, 22);
    let mut choices: Source = Source::new([23u8; 32]);

    let scale: f64 = params.scale as f64;
    let fresh: f64 = (params.noise_bound as f64 + 0.5) / scale;
    let rescale: f64 = 0.5 / scale;

    let depth: usize = 6;

    (0..16).for_each(|trial| {
        let mut pool: Vec<Tracked> = (0..4)
            .map(|i| {
                let m: f64 = 1.0 + 0.25 * i as f64 + 0.01 * trial as f64;
                Tracked {
                    ct: engine.encrypt(m, &mut source).unwrap(),
                    want: m,
                    err: fresh,
                }
            })
            .collect();

        (0..depth).for_each(|_| {
            let x: Tracked = pool[choices.next_u64n(pool.len() as u64, 15) as usize].clone();
            let y: Tracked = pool[choices.next_u64n(pool.len() as u64, 15) as usize].clone();

            let z: Tracked = match choices.next_u64n(4, 3) {
                0 => Tracked {
                    ct: engine.add(&x.ct, &y.ct).unwrap(),
                    want: x.want + y.want,
                    err: x.err + y.err,
                },
                1 => Tracked {
                    ct: engine.subtract(&x.ct, &y.ct).unwrap(),
                    want: x.want - y.want,
                    err: x.err + y.err,
                },
                2 => Tracked {
                    ct: engine.scalar_multiply(&x.ct, 0.75).unwrap(),
                    want: x.want * 0.75,
                    err: 0.75 * x.err + rescale,
                },
                _ => Tracked {
                    ct: engine.multiply(&x.ct, &y.ct).unwrap(),
                    want: x.want * y.want,
                    err: x.want.abs() * y.err + y.want.abs() * x.err + x.err * y.err + rescale,
                },
            };

            assert!(engine.is_canonical(&z.ct).unwrap());
            let have: f64 = engine.decrypt(&z.ct).unwrap();
            assert!(
                (have - z.want).abs() <= z.err + DECRYPT_SLACK,
                "trial={} have={} want={} err={}",
                trial,
                have,
                z.want,
                z.err
            );
            pool.push(z);
        });
    });
}
