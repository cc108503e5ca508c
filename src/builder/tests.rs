use {
    crate::{condop, ArnFields, Effect, Operator, PolicyDocument, PolicyStatement, Service, StatementError},
    chrono::{TimeZone, Utc},
    indoc::indoc,
    ipnet::IpNet,
    pretty_assertions::assert_eq,
    std::{str::FromStr, sync::Arc},
};

const SVC: &str = indoc! { r#"
    {
        "prefix": "svc",
        "actions": {
            "ListThings": {
                "accessLevel": "List"
            },
            "GetThing": {
                "accessLevel": "Read",
                "resourceTypes": {
                    "thing": {
                        "required": true
                    }
                }
            },
            "DescribeThing": {
                "accessLevel": "Read"
            },
            "CreateThing": {
                "accessLevel": "Write"
            },
            "DeleteThing": {
                "accessLevel": "Write"
            },
            "PutThingPolicy": {
                "accessLevel": "Permissions management"
            },
            "TagThing": {
                "accessLevel": "Tagging"
            }
        },
        "resourceTypes": {
            "thing": {
                "name": "thing",
                "arn": "arn:${Partition}:svc:${Region}:${Account}:thing/${ThingId}"
            }
        }
    }"# };

fn svc() -> Arc<Service> {
    Arc::new(Service::from_str(SVC).unwrap())
}

fn action_list(ps: &PolicyStatement) -> Vec<String> {
    ps.render().action().unwrap().to_vec().into_iter().map(String::from).collect()
}

#[test_log::test]
fn test_tagged_read_scenario() {
    let mut ps = PolicyStatement::new();
    ps.to("svc:Read")
        .to("svc:List")
        .on("arn:aws:svc:us-east-1:111111111111:thing/abc")
        .if_aws_resource_tag("owner", "team-a", None)
        .unwrap();

    assert_eq!(
        ps.to_string(),
        indoc! { r#"
        {
            "Effect": "Allow",
            "Action": [
                "svc:Read",
                "svc:List"
            ],
            "Resource": [
                "arn:aws:svc:us-east-1:111111111111:thing/abc"
            ],
            "Condition": {
                "StringLike": {
                    "aws:ResourceTag/owner": [
                        "team-a"
                    ]
                }
            }
        }"# }
    );
}

#[test_log::test]
fn test_idempotent_ordered_actions() {
    let mut once = PolicyStatement::new();
    once.to("svc:A");

    let mut twice = PolicyStatement::new();
    twice.to("svc:A").to("svc:A");
    assert_eq!(once.render(), twice.render());

    let mut ps = PolicyStatement::new();
    ps.to("svc:A").to("svc:B").add("svc:A").to("svc:C").to("svc:B");
    assert_eq!(action_list(&ps), vec!["svc:A", "svc:B", "svc:C"]);
    assert_eq!(ps.actions().len(), 3);
}

#[test_log::test]
fn test_default_resource() {
    let mut ps = PolicyStatement::new();
    ps.to("svc:A");
    assert!(!ps.has_resources());

    assert_eq!(
        ps.to_string(),
        indoc! { r#"
        {
            "Effect": "Allow",
            "Action": [
                "svc:A"
            ],
            "Resource": "*"
        }"# }
    );

    ps.on("*").on("*");
    let statement = ps.render();
    let resource = statement.resource().unwrap();
    assert!(!resource.is_single());
    assert_eq!(resource.to_vec(), vec!["*"]);
}

#[test_log::test]
fn test_empty_builder() {
    let ps = PolicyStatement::new();
    assert_eq!(
        ps.to_string(),
        indoc! { r#"
        {
            "Effect": "Allow",
            "Action": [],
            "Resource": "*"
        }"# }
    );
}

#[test_log::test]
fn test_conditions() {
    let mut ps = PolicyStatement::new();
    ps.to("svc:A");
    assert!(ps.render().condition().is_none());
    assert!(!ps.to_string().contains("Condition"));

    ps.condition("svc:Tag", "a", Some(condop::StringEquals)).unwrap();
    ps.condition("svc:Tag", "b", Some(condop::StringEquals)).unwrap();
    let statement = ps.render();
    let condition = statement.condition().unwrap();
    assert_eq!(condition.get(&condop::StringEquals).unwrap()["svc:Tag"].to_vec(), vec!["a", "b"]);

    ps.condition("svc:Tag", "c", None).unwrap();
    let statement = ps.render();
    let condition = statement.condition().unwrap();
    assert_eq!(condition.len(), 1);
    assert!(condition.get(&condop::StringEquals).is_none());
    assert_eq!(condition.get(&condop::StringLike).unwrap()["svc:Tag"].to_vec(), vec!["c"]);
}

#[test_log::test]
fn test_condition_errors() {
    let mut ps = PolicyStatement::new();
    assert_eq!(
        ps.condition("", "a", None).unwrap_err(),
        StatementError::InvalidConditionKey("".to_string())
    );
    assert_eq!(
        ps.condition("svc:Tag", Vec::<String>::new(), None).unwrap_err(),
        StatementError::EmptyConditionValues("svc:Tag".to_string())
    );
    assert_eq!(
        Operator::from_str("StringSorta").unwrap_err(),
        StatementError::InvalidConditionOperator("StringSorta".to_string())
    );
    assert!(!ps.has_conditions());
}

#[test_log::test]
fn test_render_is_a_projection() {
    let mut ps = PolicyStatement::new().with_sid("First");
    ps.to("svc:A");

    let first = ps.render();
    assert_eq!(first, ps.render());
    assert_eq!(first.sid(), Some("First"));

    ps.to("svc:B").deny();
    let second = ps.render();
    assert_eq!(second.effect(), Effect::Deny);
    assert_eq!(second.action().unwrap().len(), 2);
    assert_eq!(first.action().unwrap().len(), 1);
    assert_eq!(first.effect(), Effect::Allow);
}

#[test_log::test]
fn test_service_prefixing() {
    let mut ps = PolicyStatement::from_service(svc());
    ps.to("GetThing").to("other:Thing").condition("ThingColor", "blue", None).unwrap();

    assert_eq!(action_list(&ps), vec!["svc:GetThing", "other:Thing"]);
    assert!(ps.conditions().contains_key("svc:ThingColor"));

    let mut bare = PolicyStatement::new();
    bare.to("GetThing");
    assert_eq!(action_list(&bare), vec!["GetThing"]);
}

#[test_log::test]
fn test_access_level_selection() {
    let mut ps = PolicyStatement::from_service(svc());
    ps.all_read_actions().unwrap().all_list_actions().unwrap();
    assert_eq!(action_list(&ps), vec!["svc:GetThing", "svc:DescribeThing", "svc:ListThings"]);

    let mut ps = PolicyStatement::from_service(svc());
    ps.all_write_actions().unwrap().all_permission_management_actions().unwrap().all_tagging_actions().unwrap();
    assert_eq!(action_list(&ps), vec!["svc:CreateThing", "svc:DeleteThing", "svc:PutThingPolicy", "svc:TagThing"]);

    let mut ps = PolicyStatement::from_service(svc());
    ps.all_actions().unwrap();
    assert_eq!(action_list(&ps), vec!["svc:*"]);

    let mut ps = PolicyStatement::from_service(svc());
    ps.all_matching_actions("^(Get|Describe)").unwrap();
    assert_eq!(action_list(&ps), vec!["svc:GetThing", "svc:DescribeThing"]);

    assert_eq!(
        ps.all_matching_actions("(").unwrap_err(),
        StatementError::InvalidActionPattern("(".to_string())
    );
}

#[test_log::test]
fn test_selection_needs_catalogue() {
    let mut ps = PolicyStatement::new();
    assert_eq!(ps.all_actions().unwrap_err(), StatementError::NoServiceCatalogue("all_actions".to_string()));
    assert_eq!(
        ps.all_read_actions().unwrap_err(),
        StatementError::NoServiceCatalogue("all_read_actions".to_string())
    );
    assert_eq!(
        ps.all_matching_actions(".*").unwrap_err(),
        StatementError::NoServiceCatalogue("all_matching_actions".to_string())
    );
    assert_eq!(
        ps.on_resource_type("thing", &ArnFields::new()).unwrap_err(),
        StatementError::NoServiceCatalogue("on_resource_type".to_string())
    );
    assert!(!ps.has_actions());
}

#[test_log::test]
fn test_resource_type_resolution() {
    let mut ps = PolicyStatement::from_service(svc());
    ps.on_resource_type("thing", &ArnFields::new().region("us-east-1").set("ThingId", "abc")).unwrap();
    ps.on_resource_type("thing", &ArnFields::new().set("ThingId", "def").account("")).unwrap();

    assert_eq!(
        ps.resources().to_vec(),
        vec!["arn:aws:svc:us-east-1:*:thing/abc".to_string(), "arn:aws:svc:*::thing/def".to_string()]
    );

    assert_eq!(
        ps.on_resource_type("thing", &ArnFields::new()).unwrap_err(),
        StatementError::UnresolvedPlaceholder {
            template: "arn:${Partition}:svc:${Region}:${Account}:thing/${ThingId}".to_string(),
            placeholder: "ThingId".to_string(),
        }
    );
    assert_eq!(
        ps.on_resource_type("widget", &ArnFields::new()).unwrap_err(),
        StatementError::UnknownResourceType {
            service: "svc".to_string(),
            resource_type: "widget".to_string(),
        }
    );
    assert_eq!(ps.resources().len(), 2);
}

#[test_log::test]
fn test_blank_arn_defaults() {
    let service = Service::from_str(indoc! { r#"
        {
            "prefix": "iam",
            "arnDefaults": {
                "region": "",
                "account": ""
            },
            "resourceTypes": {
                "role": {
                    "name": "role",
                    "arn": "arn:${Partition}:iam::${Account}:role/${RoleNameWithPath}"
                }
            }
        }"# })
    .unwrap();

    let mut ps = PolicyStatement::from_service(Arc::new(service));
    ps.on_resource_type("role", &ArnFields::new().set("RoleNameWithPath", "admin")).unwrap();
    ps.on_resource_type("role", &ArnFields::new().account("123456789012").set("RoleNameWithPath", "ops")).unwrap();
    assert_eq!(
        ps.resources().to_vec(),
        vec!["arn:aws:iam:::role/admin".to_string(), "arn:aws:iam::123456789012:role/ops".to_string()]
    );
}

#[test_log::test]
fn test_negated_elements_and_principals() {
    let mut ps = PolicyStatement::new();
    ps.deny()
        .to("s3:*")
        .not_action()
        .on("arn:aws:s3:::bucket/*")
        .not_resource()
        .for_account("123456789012")
        .for_service("lambda.amazonaws.com")
        .for_federated_cognito()
        .for_account("123456789012")
        .not_principal();

    assert_eq!(
        ps.to_string(),
        indoc! { r#"
        {
            "Effect": "Deny",
            "NotAction": [
                "s3:*"
            ],
            "NotResource": [
                "arn:aws:s3:::bucket/*"
            ],
            "NotPrincipal": {
                "AWS": [
                    "arn:aws:iam::123456789012:root"
                ],
                "Federated": [
                    "cognito-identity.amazonaws.com"
                ],
                "Service": [
                    "lambda.amazonaws.com"
                ]
            }
        }"# }
    );
}

#[test_log::test]
fn test_principal_helpers() {
    let mut ps = PolicyStatement::new();
    ps.to("sts:AssumeRole")
        .for_user("111111111111", "alice")
        .for_role("111111111111", "deployer")
        .for_assumed_role_session("111111111111", "deployer", "ci")
        .for_principal("222222222222")
        .for_saml("111111111111", "corp-idp")
        .for_federated_amazon()
        .for_federated_facebook()
        .for_federated_google()
        .for_canonical_user("79a59df900b949e55d96a1e698fbacedfd6e09d98eacf8f8d5218e7cd47ef2be");

    assert_eq!(
        ps.to_string(),
        indoc! { r#"
        {
            "Effect": "Allow",
            "Action": [
                "sts:AssumeRole"
            ],
            "Resource": "*",
            "Principal": {
                "AWS": [
                    "arn:aws:iam::111111111111:user/alice",
                    "arn:aws:iam::111111111111:role/deployer",
                    "arn:aws:sts::111111111111:assumed-role/deployer/ci",
                    "222222222222"
                ],
                "CanonicalUser": [
                    "79a59df900b949e55d96a1e698fbacedfd6e09d98eacf8f8d5218e7cd47ef2be"
                ],
                "Federated": [
                    "arn:aws:iam::111111111111:saml-provider/corp-idp",
                    "www.amazon.com",
                    "graph.facebook.com",
                    "accounts.google.com"
                ]
            }
        }"# }
    );

    ps.for_public();
    assert!(ps.to_string().contains(r#""Principal": "*""#));
}

#[test_log::test]
fn test_global_condition_defaults() {
    let mut ps = PolicyStatement::new();
    ps.to("svc:A")
        .if_aws_secure_transport(None)
        .unwrap()
        .if_aws_via_aws_service(Some(false))
        .unwrap()
        .if_aws_multi_factor_auth_age(3600, None)
        .unwrap()
        .if_aws_called_via("athena.amazonaws.com", None)
        .unwrap()
        .if_aws_source_ip(IpNet::from_str("203.0.113.0/24").unwrap(), None)
        .unwrap()
        .if_aws_current_time(Utc.with_ymd_and_hms(2020, 4, 1, 0, 0, 0).unwrap(), None)
        .unwrap()
        .if_aws_token_issue_time("2020-01-01T00:00:00Z", None)
        .unwrap()
        .if_aws_principal_arn("arn:aws:iam::*:role/admin", None)
        .unwrap()
        .if_aws_request_tag("team", vec!["a", "b"], Some(condop::StringEquals))
        .unwrap()
        .if_aws_tag_keys(["team", "cost-center"], None)
        .unwrap()
        .if_aws_username("alice", None)
        .unwrap();

    let conditions = ps.conditions();
    assert_eq!(conditions.get("aws:SecureTransport"), Some((condop::Bool, vec!["true"])));
    assert_eq!(conditions.get("aws:ViaAWSService"), Some((condop::Bool, vec!["false"])));
    assert_eq!(conditions.get("aws:MultiFactorAuthAge"), Some((condop::NumericLessThan, vec!["3600"])));
    assert_eq!(
        conditions.get("aws:CalledVia"),
        Some((condop::StringEquals.for_any_value(), vec!["athena.amazonaws.com"]))
    );
    assert_eq!(conditions.get("aws:SourceIp"), Some((condop::IpAddress, vec!["203.0.113.0/24"])));
    assert_eq!(
        conditions.get("aws:CurrentTime"),
        Some((condop::DateLessThanEquals, vec!["2020-04-01T00:00:00.000Z"]))
    );
    assert_eq!(
        conditions.get("aws:TokenIssueTime"),
        Some((condop::DateGreaterThanEquals, vec!["2020-01-01T00:00:00Z"]))
    );
    assert_eq!(conditions.get("aws:PrincipalArn"), Some((condop::ArnLike, vec!["arn:aws:iam::*:role/admin"])));
    assert_eq!(conditions.get("aws:RequestTag/team"), Some((condop::StringEquals, vec!["a", "b"])));
    assert_eq!(conditions.get("aws:TagKeys"), Some((condop::StringLike, vec!["team", "cost-center"])));
    assert_eq!(conditions.get("aws:username"), Some((condop::StringLike, vec!["alice"])));

    let statement = ps.render();
    let rendered: Vec<String> = statement.condition().unwrap().iter().map(|(op, _)| op.to_string()).collect();
    assert_eq!(
        rendered,
        vec![
            "Bool",
            "NumericLessThan",
            "ForAnyValue:StringEquals",
            "IpAddress",
            "DateLessThanEquals",
            "DateGreaterThanEquals",
            "ArnLike",
            "StringEquals",
            "StringLike"
        ]
    );
}

#[test_log::test]
fn test_binary_condition() {
    let mut ps = PolicyStatement::from_service(svc());
    ps.condition_binary("Checksum", [0xde_u8, 0xad, 0xbe, 0xef], None).unwrap();
    assert_eq!(ps.conditions().get("svc:Checksum"), Some((condop::BinaryEquals, vec!["3q2+7w=="])));
}

#[test_log::test]
fn test_into_document() {
    let mut read = PolicyStatement::new().with_sid("Read");
    read.to("svc:Read");
    let mut deny = PolicyStatement::new().with_sid("NoDelete");
    deny.deny().to("svc:Delete");

    let doc: PolicyDocument = [&read, &deny].iter().map(|ps| ps.render()).collect();
    assert_eq!(doc.statement().len(), 2);
    assert_eq!(doc.statement()[1].sid(), Some("NoDelete"));
    assert_eq!(doc.statement()[1].effect(), Effect::Deny);
}
