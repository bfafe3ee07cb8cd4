//! Client handles for talking to the catalog service.

/// Generate client methods with oneshot channel boilerplate and automatic tracing.
/// A closed or dropped channel surfaces as `CatalogError::ActorCommunication`.
macro_rules! client_method {
    ($client:ty => $vis:vis fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            $vis async fn $method(&self, $($param: $param_type),*) -> $crate::messages::ServiceResult<$return_type> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender
                    .send($request::$variant {
                        $($param,)*
                        respond_to,
                    })
                    .await
                    .map_err(|_| $crate::error::CatalogError::ActorCommunication("Actor closed".to_string()))?;

                response
                    .await
                    .map_err(|_| $crate::error::CatalogError::ActorCommunication("Actor dropped".to_string()))?
            }
        }
    };
}

mod catalog_client;

pub use catalog_client::CatalogClient;
