use proc_macro::TokenStream;
use quote::quote;
use syn::{ImplItem, ItemImpl, parse_macro_input};

/// Maps `#[Event::Xxx]` attribute names to `BlockcraftPlugin` trait method names.
fn event_to_trait_method(event_name: &str) -> Option<&'static str> {
    match event_name {
        "BlockCracked" => Some("on_block_cracked"),
        "BlockBroken" => Some("on_block_broken"),
        "ItemPickedUp" => Some("on_item_picked_up"),
        "ItemUsed" => Some("on_item_used"),
        "InventorySlotChanged" => Some("on_inventory_slot_changed"),
        "HudStateChanged" => Some("on_hud_state_changed"),
        _ => None,
    }
}

/// Proc-macro attribute that generates a `BlockcraftPlugin` trait implementation.
///
/// # Usage
/// ```ignore
/// #[craft_plugin]
/// impl MyPlugin {
///     #[Event::BlockBroken]
///     fn on_break(&self, event: &BlockBrokenEvent) {
///         info!("Block broken at {}", event.cell);
///     }
/// }
/// ```
///
/// This generates:
/// - The input `impl MyPlugin` block (with event attributes stripped)
/// - An `impl BlockcraftPlugin for MyPlugin` that delegates to the annotated methods
///
/// The expansion names `crate::events::BlockcraftPlugin`, so the calling crate
/// must bring the client's `events` module into its root.
#[proc_macro_attribute]
pub fn craft_plugin(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut input = parse_macro_input!(item as ItemImpl);
    let self_ty = &input.self_ty;

    let mut trait_methods = Vec::new();
    let mut errors = Vec::new();

    for item in &mut input.items {
        let ImplItem::Fn(method) = item else {
            continue;
        };

        // Find and remove #[Event::Xxx] attributes
        let mut event_attr = None;
        method.attrs.retain(|attr| {
            let segments: Vec<_> = attr.path().segments.iter().collect();
            if segments.len() == 2 && segments[0].ident == "Event" {
                event_attr = Some(segments[1].ident.clone());
                return false;
            }
            true
        });

        let Some(event_ident) = event_attr else {
            continue;
        };

        let Some(trait_method_name) = event_to_trait_method(&event_ident.to_string()) else {
            errors.push(syn::Error::new_spanned(
                &event_ident,
                format!("unknown gameplay event `{event_ident}`"),
            ));
            continue;
        };

        let trait_method_ident = syn::Ident::new(trait_method_name, method.sig.ident.span());
        let user_method_ident = &method.sig.ident;

        // Extract the event type from the second parameter: &self, event: &EventType
        let event_type = method.sig.inputs.iter().nth(1).and_then(|arg| {
            if let syn::FnArg::Typed(pat_type) = arg {
                Some(&pat_type.ty)
            } else {
                None
            }
        });

        let Some(event_type) = event_type else {
            errors.push(syn::Error::new_spanned(
                &method.sig,
                "event handler must take the event as its second parameter",
            ));
            continue;
        };

        trait_methods.push(quote! {
            fn #trait_method_ident(&self, event: #event_type) {
                self.#user_method_ident(event)
            }
        });
    }

    if let Some(error) = errors.into_iter().reduce(|mut all, next| {
        all.combine(next);
        all
    }) {
        return error.to_compile_error().into();
    }

    let expanded = quote! {
        #input

        impl crate::events::BlockcraftPlugin for #self_ty {
            #(#trait_methods)*
        }
    };

    expanded.into()
}
