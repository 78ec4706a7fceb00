use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

#[proc_macro_derive(Document, attributes(document))]
pub fn document_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;

    let collection_name = input
        .attrs
        .iter()
        .find(|attr| attr.path.is_ident("document"))
        .and_then(|attr| attr.parse_meta().ok())
        .and_then(|meta| {
            if let syn::Meta::List(meta_list) = meta {
                meta_list.nested.into_iter().find_map(|nested_meta| {
                        let syn::NestedMeta::Meta(syn::Meta::NameValue(
                            name_value
                        )) = nested_meta
                        else {
                            return None;
                        };

                        if !name_value.path.is_ident("collection") {
                            return None;
                        };

                        let syn::Lit::Str(lit_str) = name_value.lit else {
                            return None;
                        };

                        Some(lit_str.value())
                    })
            } else {
                None
            }
        });

    let collection_name = match collection_name {
        Some(name) => name,
        None => {
            return TokenStream::from(quote! {compile_error!(
                    "The #[derive(Document)] macro requires a \
                    #[document(collection = \"...\")] attribute."
            )});
        }
    };

    TokenStream::from(quote! {
        impl #name {
            pub fn collection() -> mongodb::Collection<#name> {
                crate::mongo().collection::<#name>(#collection_name)
            }

            pub async fn find_one(
                query: mongodb::bson::Document
            ) -> Result<Option<#name>, mongodb::error::Error>
            where #name: serde::de::DeserializeOwned {
                #name::collection().find_one(query).await
            }

            pub async fn find(
                query: mongodb::bson::Document
            ) -> Result<mongodb::Cursor<#name>, mongodb::error::Error>
            where #name: serde::de::DeserializeOwned {
                #name::collection().find(query).await
            }

            pub async fn count_documents(
                query: mongodb::bson::Document
            ) -> Result<u64, mongodb::error::Error> {
                #name::collection()
                    .count_documents(query)
                    .await
            }

            pub async fn insert_one(
                &self
            ) -> Result<mongodb::results::InsertOneResult, mongodb::error::Error>
            where #name: serde::Serialize {
                #name::collection().insert_one(self).await
            }

            // ? always upserts, matching how settings writes behave
            pub async fn update_one(
                query: mongodb::bson::Document,
                update: mongodb::bson::Document
            ) -> Result<mongodb::results::UpdateResult, mongodb::error::Error> {
                #name::collection()
                    .update_one(query, update)
                    .upsert(true)
                    .await
            }
        }
    })
}
