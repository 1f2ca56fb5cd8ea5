use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pyrite::options::OptionsBuilder;
use pyrite::parse;

const FIXTURE: &str = r#"
"use strict";

class Queue {
    constructor(capacity = 16) {
        this.items = new Array(capacity);
        this.head = 0;
        this.tail = 0;
    }

    get length() {
        return (this.tail - this.head + this.items.length) % this.items.length;
    }

    push(item) {
        this.items[this.tail] = item;
        this.tail = (this.tail + 1) % this.items.length;
    }

    *drain() {
        while (this.head !== this.tail) {
            yield this.items[this.head];
            this.head = (this.head + 1) % this.items.length;
        }
    }
}

const matcher = /([a-z]+)-(\d{1,4})/i;

async function process(queue, handler) {
    for (const item of queue.drain()) {
        const match = matcher.exec(item?.name ?? "");
        if (!match) continue;
        const [, word, digits] = match;
        await handler({ word, count: Number(digits), raw: `${word}:${digits}` });
    }
}

function makeHandlers({ verbose = false, ...rest }) {
    return Object.keys(rest).map((key, index) => (value) =>
        verbose ? console.log(key, index, value) : void 0
    );
}
"#;

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_fixture", |b| {
        b.iter(|| parse(black_box(FIXTURE), OptionsBuilder::new().build()).unwrap())
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
