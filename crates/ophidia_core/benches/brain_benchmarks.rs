use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ophidia_core::brain::{GenomeLogic, GenotypeLogic};
use ophidia_data::{Genome, Genotype, LayerWidths};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const WIDTHS: LayerWidths = LayerWidths::new(24, 18, 4);

/// Benchmark the forward pass with typical inputs.
fn bench_genome_forward(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let genome = Genome::new_random_with_rng(WIDTHS, &mut rng);
    let inputs = [0.5; 24];

    c.bench_function("genome_forward", |b| {
        b.iter(|| {
            let result = genome.forward(black_box(&inputs));
            black_box(result)
        })
    });
}

fn bench_genome_decide(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let genome = Genome::new_random_with_rng(WIDTHS, &mut rng);
    let inputs = [1.0; 24];

    c.bench_function("genome_decide", |b| {
        b.iter(|| {
            let result = genome.decide(black_box(&inputs));
            black_box(result)
        })
    });
}

fn bench_genome_creation(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("genome_creation", |b| {
        b.iter(|| {
            let genome = Genome::new_random_with_rng(WIDTHS, &mut rng);
            black_box(genome)
        })
    });
}

fn bench_genome_crossover(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let p1 = Genome::new_random_with_rng(WIDTHS, &mut rng);
    let p2 = Genome::new_random_with_rng(WIDTHS, &mut rng);

    c.bench_function("genome_crossover", |b| {
        b.iter(|| {
            let child = p1.crossover_with_rng(&p2, &mut rng);
            black_box(child)
        })
    });
}

/// Benchmark a full breed: colour pick, crossover and mutation.
fn bench_genotype_breed(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let p1 = Genotype::new_random_with_rng(WIDTHS, &mut rng);
    let p2 = Genotype::new_random_with_rng(WIDTHS, &mut rng);

    c.bench_function("genotype_breed", |b| {
        b.iter(|| {
            let child = p1.breed_with_rng(&p2, 0.01, &mut rng);
            black_box(child)
        })
    });
}

criterion_group!(
    benches,
    bench_genome_forward,
    bench_genome_decide,
    bench_genome_creation,
    bench_genome_crossover,
    bench_genotype_breed
);
criterion_main!(benches);
