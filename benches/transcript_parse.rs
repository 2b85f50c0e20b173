use chatbox::core::message::Speaker;
use chatbox::core::render::Renderer;
use chatbox::core::transcript::{parse_turns, Transcript};
use chatbox::ui::bubbles::BubbleList;
use chatbox::ui::theme::Theme;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

fn make_transcript(n_pairs: usize, base: &str) -> String {
    let mut text = String::new();
    for i in 0..n_pairs {
        text.push_str(&format!("User: question {i} {base}\n"));
        text.push_str(&format!("Bot: answer {i} {base}\n"));
        if i % 10 == 0 {
            // Noise the parser has to skip
            text.push_str("system: ignored\n\n");
        }
    }
    text
}

fn bench_transcript_parse(c: &mut Criterion) {
    let base = "lorem ipsum dolor sit amet consectetur adipiscing elit sed do eiusmod tempor incididunt ut labore et dolore magna aliqua";
    let theme = Theme::dark_default();

    for &pairs in &[100usize, 1000usize] {
        let text = make_transcript(pairs, base);
        let transcript = Transcript::from(text.as_str());

        let mut group = c.benchmark_group(format!("transcript_pairs{pairs}"));
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_function(BenchmarkId::new("parse_turns", pairs), |b| {
            b.iter(|| parse_turns(black_box(&text)).count())
        });

        group.bench_function(BenchmarkId::new("load_into_bubbles", pairs), |b| {
            b.iter(|| {
                let mut bubbles = BubbleList::default();
                bubbles.clear();
                for turn in transcript.turns() {
                    bubbles.render(&turn);
                }
                bubbles.render_turn(Speaker::Bot, "done");
                black_box(bubbles.len())
            })
        });

        let mut bubbles = BubbleList::default();
        for turn in transcript.turns() {
            bubbles.render(&turn);
        }
        for &width in &[80u16, 120u16] {
            group.bench_function(BenchmarkId::new("display_lines_and_height", width), |b| {
                b.iter(|| {
                    let lines = bubbles.build_display_lines(black_box(&theme));
                    black_box((lines.len(), bubbles.wrapped_height(width)))
                })
            });
        }

        group.finish();
    }
}

criterion_group!(benches, bench_transcript_parse);
criterion_main!(benches);
