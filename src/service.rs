/// Generate a typed binding for one service: a newtype over [crate::PolicyStatement] bound to the service's
/// catalogue, with one method per action and per resource type.
///
/// The binding dereferences to [crate::PolicyStatement], so every engine method remains available. Engine methods
/// return the engine type, so call the generated methods first when chaining.
///
/// ```
/// use {policy_statement::{service_statement, ArnFields, Service}, std::{str::FromStr, sync::Arc}};
///
/// fn catalogue() -> Arc<Service> {
///     Arc::new(Service::from_str(r#"{
///         "prefix": "sqs",
///         "actions": {"SendMessage": {"accessLevel": "Write"}},
///         "resourceTypes": {"queue": {"name": "queue", "arn": "arn:${Partition}:sqs:${Region}:${Account}:${QueueName}"}}
///     }"#).unwrap())
/// }
///
/// service_statement! {
///     pub struct Sqs(catalogue()) {
///         actions {
///             to_send_message => "SendMessage";
///         }
///         resources {
///             on_queue => "queue";
///         }
///     }
/// }
///
/// let mut sqs = Sqs::new();
/// sqs.to_send_message().on_queue(&ArnFields::new().set("QueueName", "jobs")).unwrap();
/// assert_eq!(sqs.actions().to_vec(), vec!["sqs:SendMessage".to_string()]);
/// assert_eq!(sqs.resources().to_vec(), vec!["arn:aws:sqs:*:*:jobs".to_string()]);
/// ```
#[macro_export]
macro_rules! service_statement {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident($catalogue:expr) {
            actions {
                $($(#[$action_meta:meta])* $action_fn:ident => $action:literal;)*
            }
            $(resources {
                $($(#[$resource_meta:meta])* $resource_fn:ident => $resource_type:literal;)*
            })?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        $vis struct $name($crate::PolicyStatement);

        #[allow(dead_code)]
        impl $name {
            pub fn new() -> Self {
                Self($crate::PolicyStatement::from_service($catalogue))
            }

            pub fn with_sid<S: Into<String>>(sid: S) -> Self {
                Self($crate::PolicyStatement::from_service($catalogue).with_sid(sid))
            }

            pub fn into_inner(self) -> $crate::PolicyStatement {
                self.0
            }

            $(
                $(#[$action_meta])*
                pub fn $action_fn(&mut self) -> &mut Self {
                    self.0.to($action);
                    self
                }
            )*

            $($(
                $(#[$resource_meta])*
                pub fn $resource_fn(
                    &mut self,
                    fields: &$crate::ArnFields,
                ) -> Result<&mut Self, $crate::StatementError> {
                    self.0.on_resource_type($resource_type, fields)?;
                    Ok(self)
                }
            )*)?
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl ::std::ops::Deref for $name {
            type Target = $crate::PolicyStatement;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl ::std::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}
