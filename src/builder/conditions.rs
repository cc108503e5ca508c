use {
    super::PolicyStatement,
    crate::{
        condition::{ConditionValues, Operator, DEFAULT_OPERATOR},
        condop, StatementError,
    },
};

/// Define a helper for a global condition key that takes values and an optional operator.
macro_rules! global_condition_keys {
    ($($(#[$meta:meta])* $fn_name:ident => $key:literal, $default:expr;)*) => {
        impl PolicyStatement {
            $(
                $(#[$meta])*
                pub fn $fn_name<V: Into<ConditionValues>>(
                    &mut self,
                    values: V,
                    operator: Option<Operator>,
                ) -> Result<&mut Self, StatementError> {
                    self.condition($key, values, Some(operator.unwrap_or($default)))
                }
            )*
        }
    };
}

global_condition_keys! {
    /// `aws:CalledVia`. Defaults to `ForAnyValue:StringEquals`.
    if_aws_called_via => "aws:CalledVia", condop::StringEquals.for_any_value();
    if_aws_called_via_first => "aws:CalledViaFirst", DEFAULT_OPERATOR;
    if_aws_called_via_last => "aws:CalledViaLast", DEFAULT_OPERATOR;
    /// `aws:CurrentTime`. Dates given as [chrono::DateTime] are written in ISO 8601. Defaults to
    /// `DateLessThanEquals`.
    if_aws_current_time => "aws:CurrentTime", condop::DateLessThanEquals;
    /// `aws:EpochTime`, as seconds since the epoch or a date. Defaults to `DateLessThanEquals`.
    if_aws_epoch_time => "aws:EpochTime", condop::DateLessThanEquals;
    /// `aws:MultiFactorAuthAge` in seconds. Defaults to `NumericLessThan`.
    if_aws_multi_factor_auth_age => "aws:MultiFactorAuthAge", condop::NumericLessThan;
    if_aws_principal_account => "aws:PrincipalAccount", DEFAULT_OPERATOR;
    /// `aws:PrincipalArn`. Defaults to `ArnLike`.
    if_aws_principal_arn => "aws:PrincipalArn", condop::ArnLike;
    if_aws_principal_org_id => "aws:PrincipalOrgID", DEFAULT_OPERATOR;
    if_aws_principal_org_paths => "aws:PrincipalOrgPaths", DEFAULT_OPERATOR;
    if_aws_principal_type => "aws:PrincipalType", DEFAULT_OPERATOR;
    if_aws_referer => "aws:Referer", DEFAULT_OPERATOR;
    if_aws_requested_region => "aws:RequestedRegion", DEFAULT_OPERATOR;
    if_aws_source_account => "aws:SourceAccount", DEFAULT_OPERATOR;
    /// `aws:SourceArn`. Defaults to `ArnLike`.
    if_aws_source_arn => "aws:SourceArn", condop::ArnLike;
    /// `aws:SourceIp`. Accepts [ipnet::IpNet] values. Defaults to `IpAddress`.
    if_aws_source_ip => "aws:SourceIp", condop::IpAddress;
    if_aws_source_vpc => "aws:SourceVpc", DEFAULT_OPERATOR;
    if_aws_source_vpce => "aws:SourceVpce", DEFAULT_OPERATOR;
    /// `aws:TagKeys`, the tag keys present in the request.
    if_aws_tag_keys => "aws:TagKeys", DEFAULT_OPERATOR;
    /// `aws:TokenIssueTime`. Defaults to `DateGreaterThanEquals`.
    if_aws_token_issue_time => "aws:TokenIssueTime", condop::DateGreaterThanEquals;
    if_aws_user_agent => "aws:UserAgent", DEFAULT_OPERATOR;
    if_aws_userid => "aws:userid", DEFAULT_OPERATOR;
    if_aws_username => "aws:username", DEFAULT_OPERATOR;
    /// `aws:VpcSourceIp`. Defaults to `IpAddress`.
    if_aws_vpc_source_ip => "aws:VpcSourceIp", condop::IpAddress;
}

impl PolicyStatement {
    /// `aws:PrincipalTag/<tag_key>`.
    pub fn if_aws_principal_tag<V: Into<ConditionValues>>(
        &mut self,
        tag_key: &str,
        values: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        self.condition(format!("aws:PrincipalTag/{}", tag_key), values, operator)
    }

    /// `aws:RequestTag/<tag_key>`, a tag passed in the request.
    pub fn if_aws_request_tag<V: Into<ConditionValues>>(
        &mut self,
        tag_key: &str,
        values: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        self.condition(format!("aws:RequestTag/{}", tag_key), values, operator)
    }

    /// `aws:ResourceTag/<tag_key>`, a tag attached to the resource.
    pub fn if_aws_resource_tag<V: Into<ConditionValues>>(
        &mut self,
        tag_key: &str,
        values: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        self.condition(format!("aws:ResourceTag/{}", tag_key), values, operator)
    }

    /// `aws:MultiFactorAuthPresent` with the `Bool` operator. `value` defaults to `true`.
    pub fn if_aws_multi_factor_auth_present(&mut self, value: Option<bool>) -> Result<&mut Self, StatementError> {
        self.condition("aws:MultiFactorAuthPresent", value.unwrap_or(true), Some(condop::Bool))
    }

    /// `aws:SecureTransport` with the `Bool` operator. `value` defaults to `true`.
    pub fn if_aws_secure_transport(&mut self, value: Option<bool>) -> Result<&mut Self, StatementError> {
        self.condition("aws:SecureTransport", value.unwrap_or(true), Some(condop::Bool))
    }

    /// `aws:ViaAWSService` with the `Bool` operator. `value` defaults to `true`.
    pub fn if_aws_via_aws_service(&mut self, value: Option<bool>) -> Result<&mut Self, StatementError> {
        self.condition("aws:ViaAWSService", value.unwrap_or(true), Some(condop::Bool))
    }
}
