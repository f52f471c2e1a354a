//! Fake Azure CLI.
//!
//! A POSIX shell script that answers the handful of `az` calls kvsync makes,
//! keeping secrets as files under `$FAKE_AZ_STORE`. Values must not contain
//! JSON-special characters.
//!
//! Like the real CLI, `--value=@path` reads the value from `path` and
//! `--value=@-` from stdin.

use std::fs;
use std::path::Path;

const SCRIPT: &str = r#"#!/bin/sh
store="$FAKE_AZ_STORE"
name=""
value=""
file=""
prev=""
for arg in "$@"; do
  case "$prev" in
    --name) name="$arg" ;;
    --file) file="$arg" ;;
  esac
  case "$arg" in
    --value=@-) value="$(cat)" ;;
    --value=@*) value="$(cat "${arg#--value=@}" 2>/dev/null)" ;;
    --value=*) value="${arg#--value=}" ;;
  esac
  prev="$arg"
done

case "$1 $2 $3" in
  "account show "*)
    if [ -f "$store/.signed_in" ]; then
      printf '{"id":"sub-1","tenantId":"tenant-1","user":{"name":"tester@example.com"}}'
      exit 0
    fi
    echo "ERROR: Please run 'az login' to setup account." >&2
    exit 1
    ;;
  "login "*)
    if [ -n "$FAKE_AZ_LOGIN_FAILS" ]; then
      echo "login cancelled" >&2
      exit 1
    fi
    touch "$store/.signed_in"
    exit 0
    ;;
  "keyvault secret list")
    if [ -n "$FAKE_AZ_LIST_FAILS" ]; then
      echo "ERROR: (Forbidden) The user does not have secrets list permission." >&2
      exit 1
    fi
    printf '['
    sep=""
    for f in "$store"/*; do
      [ -f "$f" ] || continue
      printf '%s{"name":"%s"}' "$sep" "$(basename "$f")"
      sep=","
    done
    printf ']'
    exit 0
    ;;
  "keyvault secret show")
    if [ ! -f "$store/$name" ]; then
      echo "ERROR: (SecretNotFound) A secret with (name/id) $name was not found in this key vault." >&2
      exit 3
    fi
    printf '{"name":"%s","value":"%s"}' "$name" "$(cat "$store/$name")"
    exit 0
    ;;
  "keyvault secret set")
    if [ -n "$file" ]; then
      cp "$file" "$store/$name"
    else
      printf '%s' "$value" > "$store/$name"
    fi
    echo "$name" >> "$store/.writes"
    exit 0
    ;;
esac

echo "unexpected az call: $*" >&2
exit 2
"#;

/// Write the fake `az` into `bin`.
#[cfg(unix)]
pub fn install(bin: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let path = bin.join("az");
    fs::write(&path, SCRIPT).expect("failed to write fake az");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("failed to make fake az executable");
}

#[cfg(not(unix))]
pub fn install(_bin: &Path) {}
