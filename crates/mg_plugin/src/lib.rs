#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use mg_utils::HashMap;

// -----------------------------------------------------------------------------
// Interceptor

/// Settings handed to an interceptor before it is registered.
pub type Properties = HashMap<String, String>;

/// Wraps a component that provides the capability `C`.
///
/// Any `Fn(Box<C>) -> Box<C>` closure is an interceptor that accepts
/// every target.
pub trait Interceptor<C: ?Sized>: Send + Sync {
    /// Returns a component that layers this interceptor over `target`.
    fn wrap(&self, target: Box<C>) -> Box<C>;

    /// Returns `true` if this interceptor applies to `target`.
    fn intercepts(&self, _target: &C) -> bool {
        true
    }

    /// Configures the interceptor.
    fn set_properties(&mut self, _properties: &Properties) {}
}

impl<C, F> Interceptor<C> for F
where
    C: ?Sized,
    F: Fn(Box<C>) -> Box<C> + Send + Sync,
{
    #[inline]
    fn wrap(&self, target: Box<C>) -> Box<C> {
        self(target)
    }
}

// -----------------------------------------------------------------------------
// InterceptorChain

/// Interceptors of the capability `C`, in registration order.
///
/// # Examples
///
/// ```
/// use mg_plugin::InterceptorChain;
///
/// trait Greet {
///     fn greet(&self) -> String;
/// }
///
/// struct Plain;
/// impl Greet for Plain {
///     fn greet(&self) -> String {
///         "hi".into()
///     }
/// }
///
/// struct Loud(Box<dyn Greet>);
/// impl Greet for Loud {
///     fn greet(&self) -> String {
///         self.0.greet().to_uppercase()
///     }
/// }
///
/// let mut chain = InterceptorChain::<dyn Greet>::new();
/// chain.add_interceptor(|inner: Box<dyn Greet>| Box::new(Loud(inner)) as Box<dyn Greet>);
///
/// let greeter = chain.apply(Box::new(Plain));
/// assert_eq!(greeter.greet(), "HI");
/// ```
pub struct InterceptorChain<C: ?Sized> {
    interceptors: Vec<Box<dyn Interceptor<C>>>,
}

impl<C: ?Sized> InterceptorChain<C> {
    #[inline]
    pub const fn new() -> Self {
        Self {
            interceptors: Vec::new(),
        }
    }

    /// Appends `interceptor`; it will wrap outside all earlier ones.
    pub fn add_interceptor(&mut self, interceptor: impl Interceptor<C> + 'static) {
        self.interceptors.push(Box::new(interceptor));
    }

    /// The registered interceptors, in registration order.
    #[inline]
    pub fn interceptors(&self) -> &[Box<dyn Interceptor<C>>] {
        &self.interceptors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Wraps `target` with every interceptor that accepts it.
    ///
    /// Each interceptor sees the result of the previous one.
    pub fn apply(&self, target: Box<C>) -> Box<C> {
        self.interceptors
            .iter()
            .enumerate()
            .fold(target, |target, (position, interceptor)| {
                if interceptor.intercepts(&target) {
                    log::trace!("Applying interceptor #{position}");
                    interceptor.wrap(target)
                } else {
                    target
                }
            })
    }
}

impl<C: ?Sized> Default for InterceptorChain<C> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized> fmt::Debug for InterceptorChain<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorChain")
            .field("len", &self.interceptors.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
