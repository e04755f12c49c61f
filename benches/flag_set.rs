use criterion::{Criterion, black_box, criterion_group, criterion_main};
use optset::{AnyFlag, AnyFlagSet, Domain, Flag, FlagSet};

#[derive(Flag, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Strict,
    AllowComments,
    TrailingCommas,
    BigNumbers,
    Trace,
}

fn bench_flag_set(c: &mut Criterion) {
    let set = Mode::Strict | Mode::TrailingCommas | Mode::Trace;

    c.bench_function("flag set algebra", |b| {
        b.iter(|| {
            let set = black_box(set)
                .or(&[Mode::BigNumbers])
                .and(&[Mode::Strict])
                .xor(&[Mode::AllowComments]);
            assert!(set.has_any(&[Mode::Strict, Mode::Trace]));
        })
    });

    c.bench_function("flag set enumeration", |b| {
        b.iter(|| black_box(set).set_flags().len())
    });
}

fn bench_any_flag_set(c: &mut Criterion) {
    let strict = AnyFlag::of(Mode::Strict).unwrap();
    let trace = AnyFlag::of(Mode::Trace).unwrap();

    c.bench_function("domain lookup", |b| {
        b.iter(|| Domain::of::<Mode>().unwrap().len())
    });

    c.bench_function("any flag set algebra", |b| {
        b.iter(|| {
            let set = AnyFlagSet::unbound(black_box(0)).or(&[strict, trace]).unwrap();
            assert!(set.has_all(&[strict, trace]).unwrap());
            set.set_flags().unwrap().len()
        })
    });

    c.bench_function("typed round trip", |b| {
        b.iter(|| {
            let erased = FlagSet::from_flags(&[Mode::Strict]).erase().unwrap();
            erased.downcast::<Mode>().unwrap()
        })
    });
}

criterion_group!(benches, bench_flag_set, bench_any_flag_set);
criterion_main!(benches);
