use std::time::{Duration, Instant};

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use kare::kana::{JP_SPACE, match_glyph};
use kare::keyboard::KanaKeyboard;
use kare::session::{TypingSession, classify};

fn make_text(words: usize) -> String {
    let pool = ["がっこう", "ぱんや", "きって", "しんぶん", "ちょうど", "みず"];
    (0..words)
        .map(|i| pool[i % pool.len()])
        .collect::<Vec<_>>()
        .join(&JP_SPACE.to_string())
}

/// Typed text with roughly one wrong glyph in seven.
fn make_input(target: &[char]) -> Vec<char> {
    target
        .iter()
        .enumerate()
        .map(|(i, &ch)| if i % 7 == 3 { 'ぬ' } else { ch })
        .collect()
}

fn bench_match_glyph(c: &mut Criterion) {
    let pairs: Vec<(char, char)> = "かがきぎぱはぽほあいっつ"
        .chars()
        .zip("がかぎきはぱほぽいあつっ".chars())
        .collect();

    c.bench_function("match_glyph (12 pairs)", |b| {
        b.iter(|| {
            for &(typed, target) in &pairs {
                black_box(match_glyph(black_box(typed), black_box(target)));
            }
        })
    });
}

fn bench_classify(c: &mut Criterion) {
    let target: Vec<char> = make_text(50).chars().collect();
    let input = make_input(&target);
    let half = &input[..input.len() / 2];

    c.bench_function("classify (50 words, half typed)", |b| {
        b.iter(|| classify(black_box(&target), black_box(half)))
    });
}

fn bench_session_run(c: &mut Criterion) {
    let text = make_text(20);
    let target: Vec<char> = text.chars().collect();
    let input = make_input(&target);
    let snapshots: Vec<String> = (1..=input.len())
        .map(|n| input[..n].iter().collect())
        .collect();

    c.bench_function("update_input full run (20 words)", |b| {
        b.iter(|| {
            let t0 = Instant::now();
            let mut session = TypingSession::new(&text);
            for (i, snapshot) in snapshots.iter().enumerate() {
                session.update_input(snapshot, t0 + Duration::from_millis(i as u64 * 150));
            }
            black_box(session.metrics())
        })
    });
}

fn bench_hint_lookup(c: &mut Criterion) {
    let keyboard = KanaKeyboard::jis_kana();
    let text = make_text(20);
    let target: Vec<char> = text.chars().collect();
    let t0 = Instant::now();
    let sessions: Vec<TypingSession> = (0..target.len())
        .map(|n| {
            let mut session = TypingSession::new(&text);
            session.update_input(&target[..n].iter().collect::<String>(), t0);
            session
        })
        .collect();

    c.bench_function("next_key + locate (every cursor position)", |b| {
        b.iter(|| {
            for session in &sessions {
                black_box(keyboard.locate(&session.next_key()));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_match_glyph,
    bench_classify,
    bench_session_run,
    bench_hint_lookup
);
criterion_main!(benches);
