//! The public style API.
//!
//! [`StyleContext::css`] takes a declaration list plus passthrough props and
//! returns the props a component renders with: atomic class names on the
//! browser target, inline styles (or state style functions) on native.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Once;

use crate::atomic::{class_name, Generated, Generator};
use crate::config::{StyleConfig, Target};
use crate::error::StyleError;
use crate::native::{native_style, InlineStyle, NativeStyle};
use crate::registry::Registry;
use crate::resolve::ResolveContext;
use crate::state::{split, Split};
use crate::style::declaration::StyleList;
use crate::theme::{Breakpoint, Theme};
use crate::units::Viewport;

static MISSING_REGISTRY: Once = Once::new();

// ---------------------------------------------------------------------------
// Props
// ---------------------------------------------------------------------------

/// Props passed through to a styled component.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
    /// Pre-existing class names, space-separated.
    pub class_name: Option<String>,
    /// Inline style that overrides generated styles.
    pub style: Option<InlineStyle>,
    /// Everything else, preserved unchanged.
    pub attrs: BTreeMap<String, String>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the class name (builder).
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Set the inline style (builder).
    pub fn with_style(mut self, style: InlineStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Set another prop (builder).
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }
}

/// Styling of a named child target.
#[derive(Debug, Clone, Default)]
pub struct StyledChild {
    /// Browser: the child's classes.
    pub class_name: Option<String>,
    /// Native: the child's style, a function of the parent's interaction
    /// state when it has state buckets.
    pub style: Option<NativeStyle>,
}

/// The props a styled component renders with.
#[derive(Debug, Clone, Default)]
pub struct StyledProps {
    /// Browser: generated and passthrough classes, deduplicated. Native: the
    /// passthrough class name.
    pub class_name: Option<String>,
    /// Native: the computed style. Browser: the passthrough inline style.
    pub style: Option<NativeStyle>,
    /// Passthrough props, unchanged.
    pub attrs: BTreeMap<String, String>,
    /// Named child targets.
    pub children: BTreeMap<String, StyledChild>,
}

impl StyledProps {
    /// The class list split into classes.
    pub fn classes(&self) -> Vec<&str> {
        self.class_name
            .as_deref()
            .map(|names| names.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Styling of a child target.
    pub fn child(&self, name: &str) -> Option<&StyledChild> {
        self.children.get(name)
    }
}

// ---------------------------------------------------------------------------
// StyleContext
// ---------------------------------------------------------------------------

/// Everything `css` reads: theme, breakpoint tier, viewport, configuration and
/// the registry browser rules are registered with.
#[derive(Debug, Clone, Default)]
pub struct StyleContext {
    pub theme: Theme,
    /// Active tier. Only the native target reads it; browser output covers
    /// every tier with media queries.
    pub breakpoint: Breakpoint,
    /// Native lengths are measured against it. Without one, `vw` and `vh`
    /// lengths stay CSS text.
    pub viewport: Option<Viewport>,
    pub config: StyleConfig,
    registry: Option<Rc<RefCell<Registry>>>,
}

impl StyleContext {
    /// A browser context without a registry.
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    /// A native context.
    pub fn native(theme: Theme) -> Self {
        Self::new(theme).with_config(StyleConfig::native())
    }

    /// Set the active tier (builder).
    pub fn with_breakpoint(mut self, breakpoint: Breakpoint) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    /// Set the active tier from a viewport width (builder).
    pub fn with_width(self, width: f32) -> Self {
        self.with_breakpoint(Breakpoint::from_width(width))
    }

    /// Set the viewport and the tier active at its width (builder).
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self.with_breakpoint(viewport.breakpoint())
    }

    /// Set the configuration (builder).
    pub fn with_config(mut self, config: StyleConfig) -> Self {
        self.config = config;
        self
    }

    /// Share a registry (builder).
    pub fn with_registry(mut self, registry: Rc<RefCell<Registry>>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// The shared registry, if any.
    pub fn registry(&self) -> Option<&Rc<RefCell<Registry>>> {
        self.registry.as_ref()
    }

    /// Compute the props for a declaration list.
    pub fn css(&self, styles: impl Into<StyleList>, props: Props) -> StyledProps {
        let style = styles.into().flatten();
        let split = split(&style);
        match self.config.target {
            Target::Native => self.native_props(&split, props),
            Target::Browser => self.browser_props(&split, props),
        }
    }

    /// [`css`](Self::css) for a JSON declaration list.
    pub fn css_json(&self, json: &str, props: Props) -> Result<StyledProps, StyleError> {
        Ok(self.css(StyleList::from_json_str(json)?, props))
    }

    fn native_props(&self, split: &Split, props: Props) -> StyledProps {
        let ctx = ResolveContext::new(&self.theme, self.breakpoint)
            .for_target(Target::Native, self.viewport);
        let children = split
            .children
            .iter()
            .map(|(name, styles)| {
                let child = StyledChild {
                    class_name: None,
                    style: Some(native_style(styles, &ctx, None)),
                };
                (name.clone(), child)
            })
            .collect();

        StyledProps {
            style: Some(native_style(&split.root, &ctx, props.style.as_ref())),
            class_name: props.class_name,
            attrs: props.attrs,
            children,
        }
    }

    fn browser_props(&self, split: &Split, props: Props) -> StyledProps {
        match &self.registry {
            Some(shared) => self.browser_with(split, props, &mut shared.borrow_mut()),
            None => {
                MISSING_REGISTRY.call_once(|| {
                    log::warn!(
                        "no style registry provided, using a throwaway one; \
                         server rendering and hydration are unsupported for these styles"
                    );
                });
                self.browser_with(split, props, &mut Registry::new())
            }
        }
    }

    fn browser_with(&self, split: &Split, props: Props, registry: &mut Registry) -> StyledProps {
        let generator = Generator::new(&self.theme, &self.config);
        let mut register = |generated: Vec<Generated>| -> Vec<String> {
            generated
                .into_iter()
                .map(|generated| {
                    registry.add_rule(generated.key, generated.css);
                    generated.class_name
                })
                .collect()
        };

        let mut classes = register(generator.styles(&split.root, None));
        let mut children = BTreeMap::new();
        for (name, styles) in &split.children {
            if styles.has_state() {
                classes.push(class_name::scope(name));
            }
            let child_classes = register(generator.styles(styles, Some(name)));
            let child = StyledChild {
                class_name: Some(class_name::dedup(child_classes.iter().map(String::as_str))),
                style: None,
            };
            children.insert(name.clone(), child);
        }

        let passthrough = props.class_name.as_deref().unwrap_or_default();
        let class_name = class_name::dedup(
            classes
                .iter()
                .map(String::as_str)
                .chain(passthrough.split_whitespace()),
        );

        StyledProps {
            class_name: Some(class_name),
            style: props.style.map(NativeStyle::Inline),
            attrs: props.attrs,
            children,
        }
    }
}
