use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use sigami::{
    data::RawRow,
    ingest::Ingestor,
    mapping::CanonicalField,
    state::{Action, AppState},
};

const STATUSES: [&str; 4] = [
    "Não Iniciado",
    "Em Atendimento",
    "Aguardando Solicitante",
    "Concluída",
];
const SUBJECTS: [&str; 5] = [
    "Licenciamento",
    "Emergência Ambiental",
    "Ouvidoria SEMAS",
    "Agenda SM",
    "Chegada de Processo Judicial",
];
const CITIES: [&str; 4] = ["Belford Roxo", "Nova Iguaçu", "Rio de Janeiro", "São João de Meriti"];

fn generate_rows(count: usize) -> Vec<RawRow> {
    (0..count)
        .map(|i| {
            RawRow::new()
                .with("Nº Protocolo", format!("2025-{i:06}").as_str())
                .with("Assunto", SUBJECTS[i % SUBJECTS.len()])
                .with("Subsecretaria", ["SUBEXEC", "SUBCLAM", "SUBINFRAS"][i % 3])
                .with("Situação", STATUSES[i % STATUSES.len()])
                .with("Data de Abertura", (45_600 + (i % 365)) as f64)
                .with("Responsável", format!("Analista {}", i % 17).as_str())
                .with("Município", CITIES[i % CITIES.len()])
        })
        .collect()
}

fn bench_load(c: &mut Criterion) {
    let rows = generate_rows(20_000);
    c.bench_function("ingest_20k_rows", |b| {
        b.iter(|| {
            let state = AppState::default()
                .load(&Ingestor::default(), black_box(&rows))
                .expect("ingest");
            black_box(state.records.len())
        })
    });
}

fn bench_filter_sort(c: &mut Criterion) {
    let state = AppState::default()
        .load(&Ingestor::default(), &generate_rows(20_000))
        .expect("ingest");
    let mut group = c.benchmark_group("view_20k_rows");

    group.bench_function("unfiltered", |b| {
        b.iter(|| black_box(state.view().rows.len()))
    });

    group.bench_function("search_then_sort_by_assunto", |b| {
        b.iter_batched(
            || {
                state
                    .transition(Action::SetSearch("analista 3".into()))
                    .transition(Action::ToggleSort(CanonicalField::Assunto))
            },
            |filtered| black_box(filtered.view().rows.len()),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("status_sorted_by_abertura_desc", |b| {
        let sorted = state
            .transition(Action::SetStatus("Concluída".into()))
            .transition(Action::ToggleSort(CanonicalField::Abertura))
            .transition(Action::ToggleSort(CanonicalField::Abertura));
        b.iter(|| black_box(sorted.view().rows.len()))
    });

    group.finish();
}

criterion_group!(benches, bench_load, bench_filter_sort);
criterion_main!(benches);
