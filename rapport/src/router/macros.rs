/// Generate a report method that evaluates one [`ReportPolicy`] over the catalog.
///
/// The arguments are in scope of the `policy` expression.
///
/// [`ReportPolicy`]: rapport_core::ReportPolicy
macro_rules! report_method {
    (
        $(#[$meta:meta])*
        method: $name:ident( $( $arg_ident:ident : $arg_ty:ty ),* ),
        policy: $policy:expr
    ) => {
        $(#[$meta])*
        ///
        /// # Errors
        /// Returns an error if a catalog page fails or times out, or if the
        /// request deadline expires.
        #[cfg_attr(
            feature = "tracing",
            tracing::instrument(target = "rapport::router", skip(self))
        )]
        pub async fn $name(
            &self
            $(, $arg_ident: $arg_ty )*
        ) -> Result<rapport_core::Report<rapport_core::ReportLine>, rapport_core::RapportError> {
            self.run_policy($policy).await
        }
    };
}
