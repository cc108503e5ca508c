use {
    super::PolicyStatement,
    crate::principal::PrincipalKind,
};

const COGNITO: &str = "cognito-identity.amazonaws.com";
const AMAZON: &str = "www.amazon.com";
const FACEBOOK: &str = "graph.facebook.com";
const GOOGLE: &str = "accounts.google.com";

/// Principal helpers. IAM ARNs use the partition of the bound catalogue, or `aws` without one.
impl PolicyStatement {
    /// Everyone (`"Principal": "*"`). Overrides any other principal.
    pub fn for_public(&mut self) -> &mut Self {
        self.principals.set_public();
        self
    }

    /// The root of an account: `arn:aws:iam::<account>:root`.
    pub fn for_account(&mut self, account: &str) -> &mut Self {
        let arn = format!("arn:{}:iam::{}:root", self.partition(), account);
        self.for_principal(arn)
    }

    pub fn for_user(&mut self, account: &str, user: &str) -> &mut Self {
        let arn = format!("arn:{}:iam::{}:user/{}", self.partition(), account, user);
        self.for_principal(arn)
    }

    pub fn for_role(&mut self, account: &str, role: &str) -> &mut Self {
        let arn = format!("arn:{}:iam::{}:role/{}", self.partition(), account, role);
        self.for_principal(arn)
    }

    pub fn for_assumed_role_session(&mut self, account: &str, role: &str, session: &str) -> &mut Self {
        let arn = format!("arn:{}:sts::{}:assumed-role/{}/{}", self.partition(), account, role, session);
        self.for_principal(arn)
    }

    /// Any `AWS` principal given as a raw ARN or account id.
    pub fn for_principal<S: Into<String>>(&mut self, arn: S) -> &mut Self {
        self.principals.add(PrincipalKind::Aws, arn);
        self
    }

    /// A service principal such as `lambda.amazonaws.com`.
    pub fn for_service<S: Into<String>>(&mut self, service: S) -> &mut Self {
        self.principals.add(PrincipalKind::Service, service);
        self
    }

    pub fn for_federated<S: Into<String>>(&mut self, provider: S) -> &mut Self {
        self.principals.add(PrincipalKind::Federated, provider);
        self
    }

    pub fn for_federated_cognito(&mut self) -> &mut Self {
        self.for_federated(COGNITO)
    }

    pub fn for_federated_amazon(&mut self) -> &mut Self {
        self.for_federated(AMAZON)
    }

    pub fn for_federated_facebook(&mut self) -> &mut Self {
        self.for_federated(FACEBOOK)
    }

    pub fn for_federated_google(&mut self) -> &mut Self {
        self.for_federated(GOOGLE)
    }

    /// A SAML identity provider: `arn:aws:iam::<account>:saml-provider/<name>`.
    pub fn for_saml(&mut self, account: &str, provider_name: &str) -> &mut Self {
        let arn = format!("arn:{}:iam::{}:saml-provider/{}", self.partition(), account, provider_name);
        self.for_federated(arn)
    }

    pub fn for_canonical_user<S: Into<String>>(&mut self, id: S) -> &mut Self {
        self.principals.add(PrincipalKind::CanonicalUser, id);
        self
    }
}
