// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mock hosts shared by the unit tests.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use hashbrown::HashMap;
use peniko::Compose;

use crate::attrs::AttributeSet;
use crate::catalog::{AttrId, AttributeCatalog};
use crate::color::{Argb, ColorStateList};
use crate::element::{
    BarElement, Drawable, Element, ImageElement, ProgressElement, TextElement, TintableBackground,
    ToggleElement,
};
use crate::error::InflateError;
use crate::intercept::Hook;
use crate::pipeline::{Context, CreateHook, ElementBox, ParentedCreateHook, Pipeline};
use crate::resolver::{ColorResolver, Palette};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct MockDrawable {
    pub(crate) tint: Option<Argb>,
    pub(crate) filter: Option<(Argb, Compose)>,
    pub(crate) fill: Option<Argb>,
}

impl MockDrawable {
    pub(crate) fn flat(color: Argb) -> Self {
        Self {
            fill: Some(color),
            ..Self::default()
        }
    }
}

impl Drawable for MockDrawable {
    fn set_tint(&mut self, color: Argb) {
        self.tint = Some(color);
    }

    fn set_color_filter(&mut self, color: Argb, mode: Compose) {
        self.filter = Some((color, mode));
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum WidgetKind {
    Plain,
    Text,
    /// A checkbox: toggle and text at once.
    Toggle,
    Progress,
    Image,
    Bar,
}

/// One setter call seen by a journaled widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Change {
    pub(crate) element: String,
    pub(crate) setter: &'static str,
    pub(crate) color: Argb,
}

pub(crate) type Journal = Rc<RefCell<Vec<Change>>>;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Widget {
    pub(crate) kind: WidgetKind,
    pub(crate) name: String,
    pub(crate) journal: Option<Journal>,
    pub(crate) background: Option<MockDrawable>,
    pub(crate) background_tint: Option<ColorStateList>,
    pub(crate) support_background_tint: Option<ColorStateList>,
    pub(crate) button_tint: Option<ColorStateList>,
    pub(crate) text_color: Option<Argb>,
    pub(crate) highlight: Option<Argb>,
    pub(crate) compound: [Option<MockDrawable>; 4],
    pub(crate) compound_drawable_tint: Option<ColorStateList>,
    pub(crate) indeterminate: Option<MockDrawable>,
    pub(crate) indeterminate_tint: Option<ColorStateList>,
    pub(crate) image_tint: Option<ColorStateList>,
    pub(crate) title_color: Option<Argb>,
}

impl Widget {
    pub(crate) fn new(kind: WidgetKind) -> Self {
        Self {
            kind,
            name: String::new(),
            journal: None,
            background: None,
            background_tint: None,
            support_background_tint: None,
            button_tint: None,
            text_color: None,
            highlight: None,
            compound: [None; 4],
            compound_drawable_tint: None,
            indeterminate: (kind == WidgetKind::Progress).then(MockDrawable::default),
            indeterminate_tint: None,
            image_tint: None,
            title_color: None,
        }
    }

    pub(crate) fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub(crate) fn journaled(mut self, journal: Journal) -> Self {
        self.journal = Some(journal);
        self
    }

    /// Fills the start and end icon slots.
    pub(crate) fn with_compound_drawables(mut self) -> Self {
        self.compound[0] = Some(MockDrawable::default());
        self.compound[2] = Some(MockDrawable::default());
        self
    }

    pub(crate) fn with_background(mut self, background: MockDrawable) -> Self {
        self.background = Some(background);
        self
    }

    pub(crate) fn compound_colors(&self) -> [Option<Argb>; 4] {
        self.compound.map(|slot| slot.and_then(|d| d.tint))
    }

    pub(crate) fn effective_background_tint(&self) -> Option<&ColorStateList> {
        self.background_tint
            .as_ref()
            .or(self.support_background_tint.as_ref())
    }

    fn note(&self, setter: &'static str, color: Argb) {
        if let Some(journal) = &self.journal {
            journal.borrow_mut().push(Change {
                element: self.name.clone(),
                setter,
                color,
            });
        }
    }
}

impl Element for Widget {
    fn set_background_color(&mut self, color: Argb) {
        self.note("background_color", color);
        self.background = Some(MockDrawable::flat(color));
    }

    fn set_background_tint_list(&mut self, tint: ColorStateList) {
        self.note("background_tint_list", tint.default_color());
        self.background_tint = Some(tint);
    }

    fn background_mut(&mut self) -> Option<&mut dyn Drawable> {
        self.background.as_mut().map(|d| d as &mut dyn Drawable)
    }

    fn as_tintable_background_mut(&mut self) -> Option<&mut dyn TintableBackground> {
        Some(self)
    }

    fn as_toggle_mut(&mut self) -> Option<&mut dyn ToggleElement> {
        (self.kind == WidgetKind::Toggle).then_some(self as &mut dyn ToggleElement)
    }

    fn as_text_mut(&mut self) -> Option<&mut dyn TextElement> {
        matches!(self.kind, WidgetKind::Text | WidgetKind::Toggle)
            .then_some(self as &mut dyn TextElement)
    }

    fn as_progress_mut(&mut self) -> Option<&mut dyn ProgressElement> {
        (self.kind == WidgetKind::Progress).then_some(self as &mut dyn ProgressElement)
    }

    fn as_image_mut(&mut self) -> Option<&mut dyn ImageElement> {
        (self.kind == WidgetKind::Image).then_some(self as &mut dyn ImageElement)
    }

    fn as_bar_mut(&mut self) -> Option<&mut dyn BarElement> {
        (self.kind == WidgetKind::Bar).then_some(self as &mut dyn BarElement)
    }
}

impl TintableBackground for Widget {
    fn set_support_background_tint_list(&mut self, tint: ColorStateList) {
        self.note("support_background_tint_list", tint.default_color());
        self.support_background_tint = Some(tint);
    }
}

impl ToggleElement for Widget {
    fn set_button_tint_list(&mut self, tint: ColorStateList) {
        self.note("button_tint_list", tint.default_color());
        self.button_tint = Some(tint);
    }
}

impl TextElement for Widget {
    fn set_text_color(&mut self, color: Argb) {
        self.note("text_color", color);
        self.text_color = Some(color);
    }

    fn set_highlight_color(&mut self, color: Argb) {
        self.note("highlight_color", color);
        self.highlight = Some(color);
    }

    fn set_compound_drawable_tint_list(&mut self, tint: ColorStateList) {
        self.note("compound_drawable_tint_list", tint.default_color());
        let color = tint.default_color();
        for drawable in self.compound.iter_mut().flatten() {
            drawable.set_tint(color);
        }
        self.compound_drawable_tint = Some(tint);
    }

    fn for_each_compound_drawable(&mut self, f: &mut dyn FnMut(&mut dyn Drawable)) {
        for drawable in self.compound.iter_mut().flatten() {
            f(drawable);
        }
    }
}

impl ProgressElement for Widget {
    fn set_indeterminate_tint_list(&mut self, tint: ColorStateList) {
        self.note("indeterminate_tint_list", tint.default_color());
        if let Some(drawable) = &mut self.indeterminate {
            drawable.set_tint(tint.default_color());
        }
        self.indeterminate_tint = Some(tint);
    }

    fn indeterminate_drawable_mut(&mut self) -> Option<&mut dyn Drawable> {
        self.indeterminate.as_mut().map(|d| d as &mut dyn Drawable)
    }
}

impl ImageElement for Widget {
    fn set_image_tint_list(&mut self, tint: ColorStateList) {
        self.note("image_tint_list", tint.default_color());
        self.image_tint = Some(tint);
    }
}

impl BarElement for Widget {
    fn set_title_text_color(&mut self, color: Argb) {
        self.note("title_text_color", color);
        self.title_color = Some(color);
    }
}

/// A host scope with a fixed theme and a lazily built [`MockPipeline`].
pub(crate) struct MockContext {
    this: Weak<Self>,
    theme: HashMap<AttrId, Argb>,
    pipeline: RefCell<Option<Rc<MockPipeline>>>,
}

impl MockContext {
    pub(crate) fn new(theme: &[(i32, u32)]) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            this: this.clone(),
            theme: theme
                .iter()
                .map(|&(id, color)| (AttrId::new(id), Argb(color)))
                .collect(),
            pipeline: RefCell::new(None),
        })
    }

    /// The pipeline [`Context::pipeline`] returns, built on first use.
    pub(crate) fn mock_pipeline(&self) -> Rc<MockPipeline> {
        self.pipeline
            .borrow_mut()
            .get_or_insert_with(|| {
                let scope: Rc<dyn Context> = self.this.upgrade().expect("context is alive");
                Rc::new(MockPipeline::new(scope))
            })
            .clone()
    }
}

impl Context for MockContext {
    fn theme_color(&self, attr: AttrId) -> Option<Argb> {
        self.theme.get(&attr).copied()
    }

    fn pipeline(&self) -> Option<Rc<dyn Pipeline>> {
        Some(self.mock_pipeline())
    }
}

/// A host pipeline that knows a fixed set of fully qualified element kinds.
///
/// Every element it builds is journaled under its qualified name, and every
/// lookup is recorded in `attempts`.
pub(crate) struct MockPipeline {
    scope: Rc<dyn Context>,
    pub(crate) kinds: HashMap<&'static str, WidgetKind>,
    pub(crate) attempts: RefCell<Vec<String>>,
    pub(crate) journal: Journal,
    hook: RefCell<Option<Hook<dyn CreateHook>>>,
    parented_hook: RefCell<Option<Hook<dyn ParentedCreateHook>>>,
}

impl MockPipeline {
    pub(crate) fn new(scope: Rc<dyn Context>) -> Self {
        let kinds = [
            ("android.view.View", WidgetKind::Plain),
            ("android.view.ViewStub", WidgetKind::Plain),
            ("android.widget.TextView", WidgetKind::Text),
            ("android.widget.CheckBox", WidgetKind::Toggle),
            ("android.widget.ProgressBar", WidgetKind::Progress),
            ("android.widget.ImageView", WidgetKind::Image),
            ("android.widget.Toolbar", WidgetKind::Bar),
            ("android.webkit.WebView", WidgetKind::Plain),
            ("com.example.Badge", WidgetKind::Text),
        ];
        Self {
            scope,
            kinds: kinds.into_iter().collect(),
            attempts: RefCell::new(Vec::new()),
            journal: Journal::default(),
            hook: RefCell::new(None),
            parented_hook: RefCell::new(None),
        }
    }

    pub(crate) fn attempts(&self) -> Vec<String> {
        self.attempts.borrow().clone()
    }

    pub(crate) fn changes(&self) -> Vec<Change> {
        self.journal.borrow().clone()
    }
}

impl Pipeline for MockPipeline {
    fn scope(&self) -> Rc<dyn Context> {
        self.scope.clone()
    }

    fn create_element(
        &self,
        name: &str,
        prefix: Option<&str>,
        _attrs: &dyn AttributeSet,
    ) -> Result<ElementBox, InflateError> {
        let mut qualified = String::from(prefix.unwrap_or(""));
        qualified.push_str(name);
        self.attempts.borrow_mut().push(qualified.clone());
        if name == "Broken" {
            return Err(InflateError::construction(qualified, "inflate failed"));
        }
        let kind = *self
            .kinds
            .get(qualified.as_str())
            .ok_or_else(|| InflateError::unknown(qualified.as_str()))?;
        Ok(Box::new(
            Widget::new(kind)
                .named(&qualified)
                .journaled(self.journal.clone()),
        ))
    }

    fn hook(&self) -> Option<Hook<dyn CreateHook>> {
        self.hook.borrow().clone()
    }

    fn set_hook(&self, hook: Hook<dyn CreateHook>) {
        *self.hook.borrow_mut() = Some(hook);
    }

    fn parented_hook(&self) -> Option<Hook<dyn ParentedCreateHook>> {
        self.parented_hook.borrow().clone()
    }

    fn set_parented_hook(&self, hook: Hook<dyn ParentedCreateHook>) {
        *self.parented_hook.borrow_mut() = Some(hook);
    }

    fn rebind(&self, scope: Rc<dyn Context>) -> Rc<dyn Pipeline> {
        Rc::new(Self {
            scope,
            kinds: self.kinds.clone(),
            attempts: RefCell::new(Vec::new()),
            journal: self.journal.clone(),
            hook: RefCell::new(self.hook()),
            parented_hook: RefCell::new(self.parented_hook()),
        })
    }
}

/// A host hook that builds one element kind for one name and counts calls.
pub(crate) struct CountingHook {
    pub(crate) name: &'static str,
    pub(crate) kind: WidgetKind,
    pub(crate) journal: Journal,
    pub(crate) calls: Cell<usize>,
    pub(crate) saw_parent: Cell<bool>,
}

impl CountingHook {
    pub(crate) fn new(name: &'static str, kind: WidgetKind) -> Rc<Self> {
        Rc::new(Self {
            name,
            kind,
            journal: Journal::default(),
            calls: Cell::new(0),
            saw_parent: Cell::new(false),
        })
    }

    fn build(&self, name: &str) -> Option<ElementBox> {
        self.calls.set(self.calls.get() + 1);
        (name == self.name).then(|| {
            Box::new(
                Widget::new(self.kind)
                    .named(name)
                    .journaled(self.journal.clone()),
            ) as ElementBox
        })
    }

    pub(crate) fn changes(&self) -> Vec<Change> {
        self.journal.borrow().clone()
    }
}

impl CreateHook for CountingHook {
    fn create(
        &self,
        name: &str,
        _scope: &dyn Context,
        _attrs: &dyn AttributeSet,
    ) -> Option<ElementBox> {
        self.build(name)
    }
}

impl ParentedCreateHook for CountingHook {
    fn create_with_parent(
        &self,
        parent: Option<&dyn Element>,
        name: &str,
        _scope: &dyn Context,
        _attrs: &dyn AttributeSet,
    ) -> Option<ElementBox> {
        self.saw_parent.set(parent.is_some());
        self.build(name)
    }
}

/// A [`Palette`] that counts name resolutions.
pub(crate) struct RecordingResolver {
    palette: Palette,
    calls: Cell<usize>,
}

impl RecordingResolver {
    pub(crate) fn new(palette: Palette) -> Self {
        Self {
            palette,
            calls: Cell::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl ColorResolver for RecordingResolver {
    fn catalog(&self) -> &AttributeCatalog {
        self.palette.catalog()
    }

    fn resolve_color(&self, cx: &dyn Context, name: &str) -> Option<Argb> {
        self.calls.set(self.calls.get() + 1);
        self.palette.resolve_color(cx, name)
    }

    fn resolve_color_states(&self, cx: &dyn Context, name: &str) -> Option<ColorStateList> {
        self.calls.set(self.calls.get() + 1);
        self.palette.resolve_color_states(cx, name)
    }
}
