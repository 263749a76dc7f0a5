// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_recolor::{
    Argb, AttrId, AttributeCatalog, AttributeDispatcher, Capabilities, ColorStateList, Context,
    DeclaredAttributes, Drawable, Element, OverrideIds, Palette, Pipeline, RecolorConfig,
    TextElement,
};

struct Scope;

impl Context for Scope {
    fn theme_color(&self, _attr: AttrId) -> Option<Argb> {
        Some(Argb::BLACK)
    }

    fn pipeline(&self) -> Option<Rc<dyn Pipeline>> {
        None
    }
}

#[derive(Clone, Default)]
struct Icon(Option<Argb>);

impl Drawable for Icon {
    fn set_tint(&mut self, color: Argb) {
        self.0 = Some(color);
    }

    fn set_color_filter(&mut self, color: Argb, _mode: peniko::Compose) {
        self.0 = Some(color);
    }
}

#[derive(Clone, Default)]
struct Label {
    background: Option<Icon>,
    text: Option<Argb>,
    highlight: Option<Argb>,
    icons: [Icon; 2],
}

impl Element for Label {
    fn set_background_color(&mut self, color: Argb) {
        self.background = Some(Icon(Some(color)));
    }

    fn set_background_tint_list(&mut self, tint: ColorStateList) {
        if let Some(background) = &mut self.background {
            background.set_tint(tint.default_color());
        }
    }

    fn background_mut(&mut self) -> Option<&mut dyn Drawable> {
        self.background.as_mut().map(|b| b as &mut dyn Drawable)
    }

    fn as_text_mut(&mut self) -> Option<&mut dyn TextElement> {
        Some(self)
    }
}

impl TextElement for Label {
    fn set_text_color(&mut self, color: Argb) {
        self.text = Some(color);
    }

    fn set_highlight_color(&mut self, color: Argb) {
        self.highlight = Some(color);
    }

    fn set_compound_drawable_tint_list(&mut self, tint: ColorStateList) {
        for icon in &mut self.icons {
            icon.set_tint(tint.default_color());
        }
    }

    fn for_each_compound_drawable(&mut self, f: &mut dyn FnMut(&mut dyn Drawable)) {
        for icon in &mut self.icons {
            f(icon);
        }
    }
}

/// A registry of `n` color attributes, every other one themed.
fn dispatcher(n: i32, capabilities: Capabilities) -> AttributeDispatcher {
    let names: Vec<&'static str> = (0..n)
        .map(|i| -> &'static str { Box::leak(format!("color{i}").into_boxed_str()) })
        .collect();
    let registry: Vec<(&'static str, i32)> = names
        .iter()
        .enumerate()
        .map(|(i, name)| (*name, 0x7f04_0000 + i as i32))
        .collect();
    let mut palette = Palette::new(AttributeCatalog::from_registry(&registry));
    for (i, name) in names.iter().enumerate() {
        if i % 2 == 0 {
            palette = palette.with_color(*name, Argb(0xFF00_0000 | i as u32));
        }
    }
    let config = RecolorConfig::default().with_capabilities(capabilities);
    AttributeDispatcher::new(Rc::new(palette), &config)
}

fn declared(n: i32) -> DeclaredAttributes {
    let ids = OverrideIds::FRAMEWORK;
    let mut attrs = DeclaredAttributes::new();
    for i in 0..n {
        let value = format!("@{}", 0x7f04_0000 + i);
        match i % 5 {
            0 => attrs.push(ids.text_color, &value),
            1 => attrs.push(ids.background, &value),
            2 => attrs.push(ids.drawable_tint, &value),
            3 => attrs.push(ids.text_color_highlight, &value),
            _ => attrs.push(0x0101_0000 + i, &value),
        }
    }
    attrs
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_recolor");
    group.sample_size(50);

    for &(registry, attrs) in &[(64_i32, 4_i32), (64, 16), (4_096, 16), (4_096, 64)] {
        for (tier, capabilities) in [("full", Capabilities::FULL), ("legacy", Capabilities::LEGACY)]
        {
            let d = dispatcher(registry, capabilities);
            let set = declared(attrs);
            group.bench_function(
                format!("apply_overrides(registry={registry},attrs={attrs},{tier})"),
                |b| {
                    b.iter_batched(
                        Label::default,
                        |mut label| {
                            d.apply_overrides(&mut label, &set, &Scope);
                            black_box(label.text);
                        },
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
